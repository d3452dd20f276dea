//! Test data: a small region reference table and catalog entries

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use forecast_navigator::core::{CatalogEntry, RegionTable};

/// Region table with a BOM, padded cells, a `·` town and a row without a province
pub const REGION_CSV: &str = "\u{feff}시도,구군,동읍면,비고\n\
서울,강남구,역삼동,\n\
서울,강남구,개포동,\n\
서울 , 종로구 , 청운동 ,\n\
부산,해운대구,우동,\n\
부산,해운대구,우동,\n\
제주,제주시,일도1·2동,\n\
,유령구,유령동,\n";

pub fn region_table() -> RegionTable {
    RegionTable::parse(REGION_CSV)
}

pub fn entry(identifier: &str) -> CatalogEntry {
    CatalogEntry {
        identifier: identifier.to_string(),
        size_bytes: 1_572_864,
        size_mb: 1.5,
        coverage_start: "2024-01-01".to_string(),
        coverage_end: "2024-01-31".to_string(),
        last_modified: Utc
            .timestamp_opt(1_706_659_200, 0)
            .single()
            .unwrap_or_else(Utc::now),
    }
}
