use forecast_navigator::core::{
    error::NavigatorError, ApplyOutcome, CatalogResolver, Level, PreviewAction, ResolvedPath,
    Stage, BASELINE_FORECAST_TYPES,
};
use std::sync::Arc;

mod common;
use common::{fixtures::region_table, mock_catalog::MockCatalog};

const FULL_PATH: [&str; 5] = ["단기예보", "서울", "강남구", "역삼동", "기온"];

async fn resolver_at(catalog: &Arc<MockCatalog>, labels: &[&str]) -> CatalogResolver<MockCatalog> {
    let mut resolver = CatalogResolver::new(Arc::clone(catalog), region_table());
    resolver.load_forecast_types().await;
    for (level, label) in Level::ALL.into_iter().zip(labels) {
        resolver
            .advance(level, label)
            .await
            .unwrap_or_else(|e| panic!("selecting {level} '{label}' failed: {e}"));
    }
    resolver
}

#[cfg(test)]
mod listing_tests {
    use super::*;

    #[tokio::test]
    async fn test_forecast_types_keep_baseline_order_then_remote() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::online());
        let resolver = CatalogResolver::new(catalog, region_table());

        let types = resolver.list_forecast_types().await;
        assert!(types.warning.is_none());
        assert_eq!(
            types.value.labels(),
            vec!["단기예보", "초단기실황", "초단기예보", "중기예보"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_forecast_types_fall_back_when_offline() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::offline());
        let resolver = CatalogResolver::new(catalog, region_table());

        let types = resolver.list_forecast_types().await;
        assert_eq!(types.value.labels(), BASELINE_FORECAST_TYPES.to_vec());
        assert!(matches!(
            types.warning,
            Some(NavigatorError::RemoteUnavailable { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_region_levels_from_reference_table() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::online());
        let resolver = CatalogResolver::new(catalog, region_table());

        assert_eq!(resolver.list_provinces().labels(), vec!["부산", "서울", "제주"]);
        assert_eq!(
            resolver.list_districts("서울").labels(),
            vec!["강남구", "종로구"]
        );
        assert_eq!(
            resolver.list_towns("서울", "강남구").labels(),
            vec!["개포동", "역삼동"]
        );
        assert_eq!(resolver.list_towns("부산", "해운대구").labels(), vec!["우동"]);
        assert_eq!(
            resolver.list_towns("제주", "제주시").labels(),
            vec!["일도1.2동"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_every_province_has_districts() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::online());
        let resolver = CatalogResolver::new(catalog, region_table());

        let provinces = resolver.list_provinces();
        assert!(!provinces.is_empty());
        for province in provinces.labels() {
            assert!(
                !resolver.list_districts(province).is_empty(),
                "province {province} has no districts"
            );
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_variables_sorted_with_file_counts() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::online());
        let resolver = CatalogResolver::new(catalog, region_table());

        let variables = resolver
            .list_variables("단기예보", "서울", "강남구", "역삼동")
            .await?;
        assert_eq!(variables.labels(), vec!["강수-역삼동", "기온", "습도"]);
        assert_eq!(variables.nth(2).and_then(|v| v.file_count), Some(2));
        Ok(())
    }

    #[tokio::test]
    async fn test_files_keep_catalog_order() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::online());
        let resolver = CatalogResolver::new(catalog, region_table());

        let files = resolver
            .list_files("단기예보", "서울", "강남구", "역삼동", "기온")
            .await?;
        let names: Vec<&str> = files.iter().map(|f| f.identifier.as_str()).collect();
        assert_eq!(names, vec!["a.csv", "b.csv"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_offline_variables_are_remote_unavailable() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::offline());
        let resolver = CatalogResolver::new(catalog, region_table());

        let err = resolver
            .list_variables("단기예보", "서울", "강남구", "역삼동")
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "예보 변수 목록을 불러오는데 실패했습니다.");
        Ok(())
    }
}

#[cfg(test)]
mod navigation_tests {
    use super::*;

    #[tokio::test]
    async fn test_select_district_invalidates_deeper_levels() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::online());
        let mut resolver = resolver_at(&catalog, &FULL_PATH).await;
        assert!(resolver.files().is_some());
        resolver.toggle_preview(catalog.as_ref(), "a.csv", 40).await?;
        assert!(resolver.preview().is_some());

        assert!(resolver.select_level(Level::District, "종로구")?.is_none());

        assert_eq!(resolver.path().breadcrumb(), "단기예보 › 서울 › 종로구");
        assert_eq!(
            resolver.options(Level::Town).map(|o| o.labels()),
            Some(vec!["청운동"])
        );
        assert!(resolver.options(Level::Variable).is_none());
        assert!(resolver.files().is_none());
        assert!(resolver.preview().is_none());
        assert_eq!(resolver.stage(), Stage::Choose(Level::Town));
        Ok(())
    }

    #[tokio::test]
    async fn test_advance_then_retreat_restores_path() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::online());
        let mut resolver = resolver_at(&catalog, &[]).await;

        for (level, label) in Level::ALL.into_iter().zip(FULL_PATH) {
            let before = resolver.path().clone();
            let options_before = resolver.options(level).cloned();

            resolver.advance(level, label).await?;
            assert_eq!(resolver.retreat().as_deref(), Some(label));
            assert_eq!(resolver.path(), &before);
            assert_eq!(resolver.options(level).cloned(), options_before);

            resolver.advance(level, label).await?;
        }
        assert!(resolver.path().is_complete());
        Ok(())
    }

    #[tokio::test]
    async fn test_retreat_at_root_is_noop() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::online());
        let mut resolver = resolver_at(&catalog, &[]).await;

        assert_eq!(resolver.retreat(), None);
        assert!(resolver.path().is_empty());
        assert!(resolver.options(Level::ForecastType).is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_select_rejects_skipped_level() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::online());
        let mut resolver = resolver_at(&catalog, &["단기예보"]).await;

        let err = resolver.select_level(Level::Town, "역삼동").unwrap_err();
        assert!(matches!(err, NavigatorError::LevelOutOfOrder { .. }));
        assert_eq!(resolver.path().depth(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_select_rejects_unknown_region() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::online());
        let mut resolver = resolver_at(&catalog, &["단기예보"]).await;

        let err = resolver.select_level(Level::Province, "화성").unwrap_err();
        assert_eq!(err.to_string(), "'화성' is not a valid province");
        assert_eq!(resolver.path().depth(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_listing_keeps_selection() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::offline());
        let mut resolver = resolver_at(&catalog, &["단기예보", "서울", "강남구"]).await;

        let err = resolver.advance(Level::Town, "역삼동").await.unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(resolver.path().depth(), 4);
        assert!(resolver.options(Level::Variable).is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_reselect_reloads_listing() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::online());
        let mut resolver = resolver_at(&catalog, &["단기예보", "서울", "강남구", "역삼동"]).await;
        assert_eq!(catalog.variable_calls(), 1);

        let request = resolver.reselect()?.expect("town selection fetches variables");
        let response = request.execute(catalog.as_ref()).await;
        assert_eq!(resolver.apply(response)?, ApplyOutcome::Applied);
        assert_eq!(catalog.variable_calls(), 2);
        Ok(())
    }
}

#[cfg(test)]
mod concurrency_tests {
    use super::*;

    #[tokio::test]
    async fn test_stale_listing_is_discarded() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::online());
        let mut resolver = resolver_at(&catalog, &["단기예보", "서울", "강남구"]).await;

        let first = resolver
            .select_level(Level::Town, "역삼동")?
            .expect("variables request");
        let second = resolver
            .select_level(Level::Town, "개포동")?
            .expect("variables request");

        // The older request completes last
        let second_response = second.execute(catalog.as_ref()).await;
        let first_response = first.execute(catalog.as_ref()).await;

        assert_eq!(resolver.apply(second_response)?, ApplyOutcome::Applied);
        assert_eq!(resolver.apply(first_response)?, ApplyOutcome::Stale);
        assert!(resolver
            .options(Level::Variable)
            .is_some_and(|options| options.contains("강수-개포동")));
        Ok(())
    }

    #[tokio::test]
    async fn test_stale_listing_discarded_when_it_arrives_first() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::online());
        let mut resolver = resolver_at(&catalog, &["단기예보", "서울", "강남구"]).await;

        let first = resolver
            .select_level(Level::Town, "역삼동")?
            .expect("variables request");
        let first_response = first.execute(catalog.as_ref()).await;
        resolver.select_level(Level::Town, "개포동")?;

        assert_eq!(resolver.apply(first_response)?, ApplyOutcome::Stale);
        assert!(resolver.options(Level::Variable).is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_stale_failure_is_not_reported() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::offline());
        let mut resolver = resolver_at(&catalog, &["단기예보", "서울", "강남구"]).await;

        let first = resolver
            .select_level(Level::Town, "역삼동")?
            .expect("variables request");
        let response = first.execute(catalog.as_ref()).await;
        resolver.retreat();

        assert_eq!(resolver.apply(response)?, ApplyOutcome::Stale);
        Ok(())
    }
}

#[cfg(test)]
mod preview_tests {
    use super::*;

    #[tokio::test]
    async fn test_second_preview_of_same_file_clears_without_fetch() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::online());
        let mut resolver = resolver_at(&catalog, &FULL_PATH).await;

        resolver.toggle_preview(catalog.as_ref(), "a.csv", 40).await?;
        let preview = resolver.preview().expect("preview loaded");
        assert_eq!(preview.entry.identifier, "a.csv");
        assert_eq!(preview.sampled_lines, vec!["date,value", "2024-01-01,1.5"]);
        assert_eq!(catalog.preview_calls(), 1);

        resolver.toggle_preview(catalog.as_ref(), "a.csv", 40).await?;
        assert!(resolver.preview().is_none());
        assert_eq!(catalog.preview_calls(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_other_file_supersedes_preview() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::online());
        let mut resolver = resolver_at(&catalog, &FULL_PATH).await;

        resolver.toggle_preview(catalog.as_ref(), "a.csv", 40).await?;
        resolver.toggle_preview(catalog.as_ref(), "b.csv", 1).await?;

        let preview = resolver.preview().expect("preview loaded");
        assert_eq!(preview.entry.identifier, "b.csv");
        assert_eq!(preview.sampled_lines.len(), 1);
        assert_eq!(catalog.preview_calls(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_superseded_preview_is_discarded() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::online());
        let mut resolver = resolver_at(&catalog, &FULL_PATH).await;

        let PreviewAction::Fetch(first) = resolver.preview_action("a.csv", 40)? else {
            panic!("expected a fetch for a.csv");
        };
        let PreviewAction::Fetch(second) = resolver.preview_action("b.csv", 40)? else {
            panic!("expected a fetch for b.csv");
        };

        let first_response = first.execute(catalog.as_ref()).await;
        let second_response = second.execute(catalog.as_ref()).await;
        assert_eq!(resolver.apply_preview(first_response)?, ApplyOutcome::Stale);
        assert_eq!(resolver.apply_preview(second_response)?, ApplyOutcome::Applied);
        assert_eq!(
            resolver.preview().map(|p| p.entry.identifier.as_str()),
            Some("b.csv")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_reselecting_in_flight_file_cancels_it() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::online());
        let mut resolver = resolver_at(&catalog, &FULL_PATH).await;

        let PreviewAction::Fetch(request) = resolver.preview_action("a.csv", 40)? else {
            panic!("expected a fetch for a.csv");
        };
        assert!(matches!(
            resolver.preview_action("a.csv", 40)?,
            PreviewAction::Cleared
        ));

        let response = request.execute(catalog.as_ref()).await;
        assert_eq!(resolver.apply_preview(response)?, ApplyOutcome::Stale);
        assert!(resolver.preview().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_preview_line_limit_bounds() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::online());
        let mut resolver = resolver_at(&catalog, &FULL_PATH).await;

        for limit in [0, 201] {
            let err = resolver.preview_action("a.csv", limit).unwrap_err();
            assert!(matches!(err, NavigatorError::InvalidLineLimit { .. }));
        }
        assert!(resolver.preview_action("a.csv", 200).is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn test_preview_failure_is_localized() -> anyhow::Result<()> {
        let online = Arc::new(MockCatalog::online());
        let mut resolver = resolver_at(&online, &FULL_PATH).await;
        let offline = MockCatalog::offline();

        let err = resolver
            .toggle_preview(&offline, "a.csv", 40)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "파일 미리보기를 불러오는데 실패했습니다.");
        assert!(resolver.preview().is_none());
        Ok(())
    }
}

#[cfg(test)]
mod download_tests {
    use super::*;

    #[tokio::test]
    async fn test_download_passes_full_path_and_identifier() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::online());
        let resolver = resolver_at(&catalog, &FULL_PATH).await;

        let request = resolver.download(catalog.as_ref(), "a.csv")?;

        let expected = ResolvedPath::new("단기예보", "서울", "강남구", "역삼동", "기온");
        assert_eq!(request.path, expected);
        assert_eq!(request.identifier, "a.csv");
        assert_eq!(catalog.recorded_downloads(), vec![request.clone()]);
        assert_eq!(
            request.path.query_pairs(),
            vec![
                ("forecast_type", "단기예보"),
                ("city", "서울"),
                ("district", "강남구"),
                ("town", "역삼동"),
                ("variable", "기온"),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_download_requires_complete_path() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::online());
        let resolver = resolver_at(&catalog, &["단기예보", "서울"]).await;

        let err = resolver.download(catalog.as_ref(), "a.csv").unwrap_err();
        assert!(matches!(err, NavigatorError::PathIncomplete));
        assert!(catalog.recorded_downloads().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_download_rejects_unlisted_file() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::online());
        let resolver = resolver_at(&catalog, &FULL_PATH).await;

        let err = resolver.download(catalog.as_ref(), "zzz.csv").unwrap_err();
        assert!(matches!(err, NavigatorError::UnknownEntry { .. }));
        Ok(())
    }
}

#[cfg(test)]
mod persistence_tests {
    use super::*;
    use common::fixtures::REGION_CSV;
    use forecast_navigator::core::RegionTable;

    #[tokio::test]
    async fn test_state_round_trip_restores_navigation() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::online());
        let mut resolver = resolver_at(&catalog, &FULL_PATH).await;
        resolver.toggle_preview(catalog.as_ref(), "b.csv", 40).await?;

        let json = serde_json::to_string(&resolver.to_state())?;
        let state = serde_json::from_str(&json)?;
        let restored = CatalogResolver::from_state(Arc::clone(&catalog), region_table(), state);

        assert_eq!(restored.path(), resolver.path());
        assert_eq!(restored.files(), resolver.files());
        assert_eq!(restored.preview(), resolver.preview());
        for level in Level::ALL {
            assert_eq!(restored.options(level), resolver.options(level));
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_state_cut_at_region_missing_from_table() -> anyhow::Result<()> {
        let catalog = Arc::new(MockCatalog::online());
        let resolver = resolver_at(&catalog, &FULL_PATH).await;

        let without_gangnam: String = REGION_CSV
            .lines()
            .filter(|line| !line.contains("강남구"))
            .map(|line| format!("{line}\n"))
            .collect();
        let restored = CatalogResolver::from_state(
            Arc::clone(&catalog),
            RegionTable::parse(&without_gangnam),
            resolver.to_state(),
        );

        assert_eq!(restored.path().breadcrumb(), "단기예보 › 서울");
        assert_eq!(
            restored.options(Level::District).map(|o| o.labels()),
            Some(vec!["종로구"])
        );
        assert!(restored.files().is_none());
        Ok(())
    }
}
