//! Core functionality for the forecast-navigator tool.
//!
//! This module provides the catalog resolver and everything around it: the
//! selection model, the region reference table, the HTTP catalog client, state
//! caching, error handling and UI components.

pub mod choice_parser;
pub mod client;
pub mod command_init;
pub mod config;
pub mod dirs;
pub mod error;
pub mod level;
pub mod option_set;
pub mod output;
pub mod records;
pub mod reference_table;
pub mod resolver;
pub mod selection;
pub mod source;
pub mod state;
pub mod templates;

// === Error handling ===
pub use error::{NavigatorError, RemoteQuery, Result};

// === Selection model ===
// Levels of the funnel, the path chosen so far and the options for each level
pub use level::{Level, Stage};
pub use option_set::{CatalogOption, OptionSet};
pub use selection::{RegionPath, ResolvedPath, SelectionPath};

// === Catalog ===
// Remote seams, their HTTP implementation and the static region table
pub use client::CatalogClient;
pub use records::{CatalogEntry, CatalogSummary, PreviewResult, VariableSummary};
pub use reference_table::{RegionRow, RegionTable};
pub use source::{CatalogSource, DownloadRequest, PreviewGateway};

// === Resolver ===
pub use resolver::{
    ApplyOutcome, CatalogResolver, Fallback, FetchRequest, FetchResponse, PreviewAction,
    PreviewRequest, PreviewResponse, BASELINE_FORECAST_TYPES,
};

// === State management ===
pub use state::{ResolverState, StateCache};

// === Choice parsing ===
// Parser for the user's pick at the current stage: "3" or "강남구"
pub use choice_parser::{Choice, ChoiceParser};

// === Command initialization ===
pub use command_init::{CommandContext, CommandInit, SessionOptions};

// === UI templates ===
pub use templates::{
    render_template, render_template_plain, strip_ansi_codes, TemplateContext, Templates, TEMPLATES,
};

// === Output formatting ===
pub use output::{
    print_error, print_error_with_structured_usage, print_info, print_section_header,
    print_success, print_warning,
};
