//! # Job Worker Flows
//!
//! Starts the full runtime against an on-disk catalog and pushes uploads
//! through the detection and translation queues.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use node_runtime::adapters::SqliteStore;
    use node_runtime::container::AppContext;
    use node_runtime::handlers::{DetectionReport, TranslateOptions, TranslationReport};
    use shared_types::{IdentifierKind, JobStatus, JobToken};
    use tempfile::TempDir;

    use crate::fixtures::{self, gene_upload, is_ambiguous, is_unmapped};

    const GENES: u64 = 500;
    const ROWS: u64 = 30;

    async fn runtime() -> (TempDir, AppContext) {
        let root = tempfile::tempdir().unwrap();
        let config = fixtures::runtime_config(root.path()).unwrap();
        {
            let store = SqliteStore::open(&config.database).unwrap();
            fixtures::seed_gene_catalog(&store, GENES).unwrap();
        }
        std::fs::write(config.upload_path("genes.csv"), gene_upload(ROWS)).unwrap();
        let ctx = AppContext::start(config).await.unwrap();
        (root, ctx)
    }

    async fn settle<T>(status: impl Fn() -> JobStatus<T>) -> JobStatus<T> {
        for _ in 0..1000 {
            match status() {
                JobStatus::Pending => tokio::time::sleep(Duration::from_millis(10)).await,
                done => return done,
            }
        }
        status()
    }

    fn expected(pred: fn(u64) -> bool) -> usize {
        (1..=ROWS).filter(|&n| pred(n)).count()
    }

    #[tokio::test]
    async fn test_detection_job_end_to_end() {
        let (_root, ctx) = runtime().await;
        let token = ctx.detector().start("genes.csv").await.unwrap();
        assert_eq!(token, JobToken::from_input("genes.csv"));

        let report: DetectionReport = match settle(|| ctx.detector().status(&token)).await {
            JobStatus::Done(report) => report,
            other => panic!("detection did not finish: {:?}", other),
        };

        let kinds: Vec<_> = report.fields.iter().map(|f| (f.header.as_str(), f.kind)).collect();
        assert_eq!(
            kinds,
            [
                ("gene", IdentifierKind::PrefixedIntegers),
                ("symbol", IdentifierKind::Text),
                ("score", IdentifierKind::Floats),
            ]
        );
        assert!(report.detected["gene"].contains_key("hgnc"));
        assert!(report.detected["symbol"].contains_key("symbol"));
        assert_eq!(report.maps["hgnc"], ["entrez", "symbol"]);
        assert_eq!(report.sources.len(), 3);

        // The stored document is plain JSON
        let path = ctx
            .config()
            .result_dir
            .join(format!("{}.detection.json", token));
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(raw["status"], "ok");
        assert_eq!(raw["payload"]["fields"][0]["type"], "prefixed integers");
    }

    #[tokio::test]
    async fn test_translation_job_end_to_end() {
        let (_root, ctx) = runtime().await;
        let options = TranslateOptions {
            drop_missing: true,
            ..TranslateOptions::new("gene", "hgnc", "entrez")
        };
        let token = ctx
            .translator_jobs()
            .start("genes.csv", options)
            .await
            .unwrap();

        let report: TranslationReport =
            match settle(|| ctx.translator_jobs().status(&token)).await {
                JobStatus::Done(report) => report,
                other => panic!("translation did not finish: {:?}", other),
            };

        let missing = expected(is_unmapped);
        let ambiguous = expected(is_ambiguous);
        assert_eq!(report.stats.total_records, ROWS as usize);
        assert_eq!(report.stats.source_missing_records, missing);
        assert_eq!(report.stats.source_missing_values, missing);
        assert_eq!(report.stats.destination_multiple_records, ambiguous);
        assert_eq!(report.stats.destination_multiple_new_count, ambiguous);

        let output = std::fs::read_to_string(
            ctx.config().download_path(&report.new_filename),
        )
        .unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "gene,symbol,score,entrez");
        assert_eq!(lines.len(), 1 + ROWS as usize - missing);
        assert!(lines.contains(&"HGNC:7,GENE7,7.5,7|100007"));
        assert!(!lines.iter().any(|l| l.starts_with("HGNC:10,")));

        assert!(report.methods.contains(&format!("loss of {}/{}", missing, ROWS)));
        assert!(report.methods.contains("sourced on 15 May, 2019"));
        assert!(report.methods.contains("HGNC IDs were expanded"));
    }

    #[tokio::test]
    async fn test_failed_jobs_are_reported() {
        let (_root, ctx) = runtime().await;

        let detect = ctx.detector().start("missing.csv").await.unwrap();
        match settle(|| ctx.detector().status(&detect)).await {
            JobStatus::Failed(message) => assert!(message.starts_with("unable to read input")),
            other => panic!("expected failure, got {:?}", other),
        }

        let translate = ctx
            .translator_jobs()
            .start("genes.csv", TranslateOptions::new("gene", "entrez", "symbol"))
            .await
            .unwrap();
        match settle(|| ctx.translator_jobs().status(&translate)).await {
            JobStatus::Failed(message) => {
                assert!(message.starts_with("unable to get translator"))
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_queued_jobs_all_complete() {
        let (_root, ctx) = runtime().await;
        let mut tokens = Vec::new();
        for n in 0..6 {
            let name = format!("copy{}.csv", n);
            std::fs::write(ctx.config().upload_path(&name), gene_upload(5)).unwrap();
            tokens.push(ctx.detector().start(&name).await.unwrap());
        }
        for token in &tokens {
            assert!(matches!(
                settle(|| ctx.detector().status(token)).await,
                JobStatus::Done(_)
            ));
        }
    }
}
