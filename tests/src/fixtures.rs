//! # Gene Catalog Fixture
//!
//! Three sources over `genes` synthetic genes:
//!
//! | source | identifiers            | subsets              |
//! |--------|------------------------|----------------------|
//! | hgnc   | `HGNC:<n>`             | human                |
//! | entrez | `<n>`, `100000 + <n>`  | human, mouse         |
//! | symbol | `GENE<n>`              | human                |
//!
//! `hgnc` maps to `entrez` and `symbol`. Every tenth gene has no entrez
//! cross-reference; every seventh has a second entrez id.

use std::path::Path;

use cb_01_bloom_index::BloomIndex;
use cb_03_source_catalog::{DirectiveRow, SourceRow};
use node_runtime::adapters::SqliteStore;
use node_runtime::container::RuntimeConfig;
use shared_types::StoreError;

pub const MOUSE_OFFSET: u64 = 100_000;

pub const HGNC_TO_ENTREZ: &str = "SELECT entrez FROM xref_hgnc_entrez WHERE hgnc = ? ORDER BY entrez";
pub const ENTREZ_TO_HGNC: &str = "SELECT hgnc FROM xref_hgnc_entrez WHERE entrez = ? ORDER BY hgnc";
pub const HGNC_TO_SYMBOL: &str = "SELECT symbol FROM xref_hgnc_symbol WHERE hgnc = ?";
pub const SYMBOL_TO_HGNC: &str = "SELECT hgnc FROM xref_hgnc_symbol WHERE symbol = ?";

pub fn hgnc_id(n: u64) -> String {
    format!("HGNC:{}", n)
}

pub fn symbol(n: u64) -> String {
    format!("GENE{}", n)
}

/// Gene `n` has no entrez cross-reference.
pub fn is_unmapped(n: u64) -> bool {
    n % 10 == 0
}

/// Gene `n` has two entrez ids.
pub fn is_ambiguous(n: u64) -> bool {
    n % 7 == 0 && !is_unmapped(n)
}

/// Create the three sources, their indexes and both cross-reference tables.
pub fn seed_gene_catalog(store: &SqliteStore, genes: u64) -> Result<(), StoreError> {
    store.put_source(&SourceRow {
        source_id: 1,
        name: "hgnc".to_string(),
        description: "HGNC ID".to_string(),
        ident_type: "prefixed integers".to_string(),
        url: "https://www.genenames.org".to_string(),
        id_url: "https://www.genenames.org/data/gene-symbol-report/#!/hgnc_id/%s".to_string(),
        citedata: "TY  - JOUR\nAU  - Braschi, Bryony\nAU  - Denny, Paul\n\
                   TI  - Genenames.org: the HGNC and VGNC resources in 2019\n\
                   T2  - Nucleic Acids Research\nPY  - 2019\nER  - \n"
            .to_string(),
    })?;
    store.put_source(&SourceRow {
        source_id: 2,
        name: "entrez".to_string(),
        description: "Entrez Gene ID".to_string(),
        ident_type: "integers".to_string(),
        url: "https://www.ncbi.nlm.nih.gov/gene".to_string(),
        id_url: "https://www.ncbi.nlm.nih.gov/gene/%s".to_string(),
        citedata: String::new(),
    })?;
    store.put_source(&SourceRow {
        source_id: 3,
        name: "symbol".to_string(),
        description: "Gene Symbol".to_string(),
        ident_type: "text".to_string(),
        ..Default::default()
    })?;

    let capacity = genes as usize;
    let mut hgnc = BloomIndex::new();
    let mut entrez_human = BloomIndex::new();
    let mut entrez_mouse = BloomIndex::new();
    let mut symbols = BloomIndex::new();
    for index in [&mut hgnc, &mut entrez_human, &mut entrez_mouse, &mut symbols] {
        index.advise(capacity);
    }

    let mut sql = String::from(
        "CREATE TABLE xref_hgnc_entrez (hgnc TEXT, entrez INTEGER);
         CREATE TABLE xref_hgnc_symbol (hgnc TEXT, symbol TEXT);
         BEGIN;",
    );
    for n in 1..=genes {
        hgnc.learn(&hgnc_id(n));
        entrez_human.learn(&n.to_string());
        entrez_mouse.learn(&(MOUSE_OFFSET + n).to_string());
        symbols.learn(&symbol(n));

        sql.push_str(&format!(
            "INSERT INTO xref_hgnc_symbol VALUES ('{}', '{}');",
            hgnc_id(n),
            symbol(n)
        ));
        if is_unmapped(n) {
            continue;
        }
        sql.push_str(&format!(
            "INSERT INTO xref_hgnc_entrez VALUES ('{}', {});",
            hgnc_id(n),
            n
        ));
        if is_ambiguous(n) {
            sql.push_str(&format!(
                "INSERT INTO xref_hgnc_entrez VALUES ('{}', {});",
                hgnc_id(n),
                MOUSE_OFFSET + n
            ));
        }
    }
    sql.push_str("COMMIT;");
    store.execute_batch(&sql)?;

    store.put_index(1, "human", &hgnc, "2019-06-01 00:00:00")?;
    store.put_index(2, "human", &entrez_human, "2019-05-15")?;
    store.put_index(2, "mouse", &entrez_mouse, "2019-04-20")?;
    store.put_index(3, "human", &symbols, "2019-06-01")?;

    store.put_directive(&DirectiveRow {
        left_source_id: 1,
        right_source_id: 2,
        map_query_lr: HGNC_TO_ENTREZ.to_string(),
        map_query_rl: ENTREZ_TO_HGNC.to_string(),
        last_update: "2019-05-15".to_string(),
        element_count: genes,
    })?;
    store.put_directive(&DirectiveRow {
        left_source_id: 1,
        right_source_id: 3,
        map_query_lr: HGNC_TO_SYMBOL.to_string(),
        map_query_rl: SYMBOL_TO_HGNC.to_string(),
        last_update: "2019-06-01".to_string(),
        element_count: genes,
    })?;
    Ok(())
}

/// Runtime configuration rooted in `root`, with its directories created.
pub fn runtime_config(root: &Path) -> std::io::Result<RuntimeConfig> {
    let config = RuntimeConfig {
        database: root.join("sources.sqlite"),
        upload_dir: root.join("uploads"),
        result_dir: root.join("results"),
        download_dir: root.join("downloads"),
        ..Default::default()
    };
    config.ensure_directories()?;
    Ok(config)
}

/// Upload body with `gene`, `symbol` and `score` columns for genes `1..=rows`.
pub fn gene_upload(rows: u64) -> String {
    let mut body = String::from("gene,symbol,score\n");
    for n in 1..=rows {
        body.push_str(&format!("{},{},{}.5\n", hgnc_id(n), symbol(n), n));
    }
    body
}
