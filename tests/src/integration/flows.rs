//! # Integration Test Flows
//!
//! Loads the gene catalog from SQLite and drives the detection engine and
//! translators directly, without the job workers.
//!
//! ## Flows Tested:
//!
//! 1. **Catalog load**: sources, subsets and the mapping graph
//! 2. **Detection**: samples resolve to the right source and subset
//! 3. **Translation**: cached lookups through the catalog's translators

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cb_03_source_catalog::{CatalogError, SourceCatalog};
    use cb_04_detection::{classify_column, DetectionEngine};
    use node_runtime::adapters::SqliteStore;
    use shared_types::IdentifierKind;

    use crate::fixtures::{self, hgnc_id, symbol, MOUSE_OFFSET};

    const GENES: u64 = 2000;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn catalog() -> Arc<SourceCatalog> {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        fixtures::seed_gene_catalog(&store, GENES).unwrap();
        let config = node_runtime::RuntimeConfig::default().translator();
        Arc::new(SourceCatalog::load(store.as_ref(), store.clone(), config).unwrap())
    }

    // =============================================================================
    // CATALOG
    // =============================================================================

    #[test]
    fn test_catalog_loads_sources_and_graph() {
        let catalog = catalog();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.directives().len(), 2);
        assert_eq!(catalog.mappings("hgnc"), ["entrez", "symbol"]);
        assert_eq!(catalog.mappings("entrez"), ["hgnc"]);
        assert_eq!(catalog.mappings("symbol"), ["hgnc"]);

        let entrez = catalog.source("entrez").unwrap();
        assert_eq!(entrez.kind, IdentifierKind::Integers);
        assert_eq!(entrez.subset_count(), 2);
        assert_eq!(
            entrez.linkout("7157").as_deref(),
            Some("https://www.ncbi.nlm.nih.gov/gene/7157")
        );
        assert!(catalog.source("hgnc").unwrap().cite().starts_with("Braschi et al."));
    }

    #[test]
    fn test_no_translators_until_requested() {
        let catalog = catalog();
        assert_eq!(catalog.translator_count(), 0);
        catalog.get_translator("hgnc", "entrez").unwrap();
        catalog.get_translator("hgnc", "entrez").unwrap();
        assert_eq!(catalog.translator_count(), 1);
    }

    // =============================================================================
    // DETECTION
    // =============================================================================

    #[test]
    fn test_prefixed_ids_detected_as_hgnc() {
        let engine = DetectionEngine::new(catalog());
        let samples: Vec<String> = (1..=200).map(hgnc_id).collect();

        assert_eq!(classify_column(&samples), IdentifierKind::PrefixedIntegers);

        let detected = engine.identify(&samples);
        assert_eq!(detected.keys().collect::<Vec<_>>(), ["hgnc"]);
        let hit = &detected["hgnc"];
        assert_eq!(hit.hits, 200);
        assert_eq!(hit.unique_hits, 200);
        assert_eq!(hit.examples.len(), 10);
        assert_eq!(hit.examples[0], "HGNC:1");
    }

    #[test]
    fn test_best_subset_wins_per_source() {
        let engine = DetectionEngine::new(catalog());
        let samples: Vec<String> = (1..=150)
            .map(|n| n.to_string())
            .chain((1..=50).map(|n| (MOUSE_OFFSET + n).to_string()))
            .collect();

        let detected = engine.identify(&samples);
        let hit = &detected["entrez"];
        assert_eq!(hit.subset, "human");
        assert!(hit.hits >= 150);
        assert_eq!(hit.tested, 200);
    }

    #[test]
    fn test_ranking_lists_every_matching_subset() {
        let engine = DetectionEngine::new(catalog());
        let samples: Vec<String> = (1..=150)
            .map(|n| n.to_string())
            .chain((1..=50).map(|n| (MOUSE_OFFSET + n).to_string()))
            .collect();

        let ranked = engine.determine_source(&samples);
        assert!(ranked.len() >= 2);
        assert_eq!(ranked[0].source_name, "entrez");
        assert_eq!(ranked[0].subset, "human");
        assert!(ranked
            .iter()
            .any(|h| h.source_name == "entrez" && h.subset == "mouse" && h.hits >= 50));
    }

    #[test]
    fn test_unknown_values_detect_nothing() {
        let engine = DetectionEngine::new(catalog());
        let samples: Vec<String> = (0..1000).map(|n| format!("zz-unknown-{}", n)).collect();
        assert!(engine.identify(&samples).is_empty());
        assert!(engine.identify(&Vec::<String>::new()).is_empty());
    }

    // =============================================================================
    // TRANSLATION
    // =============================================================================

    #[test]
    fn test_translate_hgnc_to_entrez() {
        let catalog = catalog();
        let translator = catalog.get_translator("hgnc", "entrez").unwrap();

        assert_eq!(translator.get("HGNC:1"), Some(vec!["1".to_string()]));
        assert_eq!(
            translator.get("HGNC:7"),
            Some(vec!["7".to_string(), (MOUSE_OFFSET + 7).to_string()])
        );
        assert_eq!(translator.get("HGNC:10"), None);
        assert_eq!(translator.get("HGNC:999999"), None);

        // Second lookups are served from the cache
        assert_eq!(translator.get("HGNC:1"), Some(vec!["1".to_string()]));
        assert_eq!(translator.get("HGNC:10"), None);
        let metrics = translator.metrics().snapshot();
        assert_eq!(metrics.cache_hits, 2);
        assert_eq!(metrics.store_queries, 4);
    }

    #[test]
    fn test_translate_in_reverse_direction() {
        let catalog = catalog();
        let to_hgnc = catalog.get_translator("symbol", "hgnc").unwrap();
        assert_eq!(to_hgnc.get(&symbol(42)), Some(vec![hgnc_id(42)]));

        let entrez_to_hgnc = catalog.get_translator("entrez", "hgnc").unwrap();
        assert_eq!(
            entrez_to_hgnc.get(&(MOUSE_OFFSET + 14).to_string()),
            Some(vec![hgnc_id(14)])
        );
    }

    #[test]
    fn test_unconnected_sources_have_no_translator() {
        let catalog = catalog();
        assert!(matches!(
            catalog.get_translator("entrez", "symbol"),
            Err(CatalogError::NoSupportedMapping { .. })
        ));
        assert!(matches!(
            catalog.get_translator("nope", "hgnc"),
            Err(CatalogError::NoSupportedMapping { .. })
        ));
    }

    #[test]
    fn test_translators_shared_across_threads() {
        let catalog = catalog();
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let catalog = Arc::clone(&catalog);
                std::thread::spawn(move || {
                    let translator = catalog.get_translator("hgnc", "symbol").unwrap();
                    for n in 1..=100u64 {
                        let id = (t * 100 + n) % 500 + 1;
                        assert_eq!(translator.get(&hgnc_id(id)), Some(vec![symbol(id)]));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(catalog.translator_count(), 1);
    }
}
