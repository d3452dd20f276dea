//! Forecast Navigator - a command-line navigator for a hierarchical weather
//! forecast data catalog.
//!
//! The catalog is browsed one level at a time: forecast type, province, district,
//! town, variable, and finally the files of that variable. Region levels come
//! from a static reference table, the rest from a remote catalog API.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module:
//! - The [`CatalogResolver`] and its selection model
//! - The [`CatalogSource`] / [`PreviewGateway`] seams and their HTTP client
//! - Error handling and result types
//! - UI templates

pub mod commands;
pub mod core;

pub use core::{
    render_template,
    render_template_plain,
    strip_ansi_codes,

    ApplyOutcome,
    CatalogClient,
    CatalogEntry,
    CatalogOption,
    // Resolver
    CatalogResolver,
    // Remote seams
    CatalogSource,
    DownloadRequest,
    // Selection model
    Level,
    // Error handling
    NavigatorError,
    OptionSet,
    PreviewGateway,
    RegionTable,
    Result,
    SelectionPath,
    Stage,

    TemplateContext,
    // UI and formatting
    Templates,
    TEMPLATES,
};
