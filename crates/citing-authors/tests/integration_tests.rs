//! Integration tests against the live NCBI E-utilities.
//!
//! Run with: `cargo test --features integration -- --nocapture`

#![cfg(feature = "integration")]

use std::sync::Arc;

use citing_authors::client::{Bibliographic, EutilsClient};
use citing_authors::config::Config;
use citing_authors::models::{CitingAuthorsRequest, ExclusionPolicy, GroupingMode, Pmid};
use citing_authors::pipeline::CitationPipeline;

/// Well-known PubMed records.
mod pmids {
    /// Jinek et al. 2012, "A programmable dual-RNA-guided DNA endonuclease..."
    pub const JINEK_2012: &str = "22745249";
}

fn create_client() -> Arc<EutilsClient> {
    let config = Config::from_env().expect("Failed to read configuration");
    Arc::new(EutilsClient::new(&config).expect("Failed to create client"))
}

#[tokio::test]
async fn test_live_search() {
    let client = create_client();
    let ids = client.search("jinek[au] AND 2012[dp] AND crispr").await.unwrap();
    assert!(ids.contains(&Pmid::from(pmids::JINEK_2012)), "{ids:?}");
}

#[tokio::test]
async fn test_live_cited_by_and_summaries() {
    let client = create_client();
    let cited_by = client.cited_by(&[Pmid::from(pmids::JINEK_2012)]).await.unwrap();
    assert_eq!(cited_by.len(), 1);
    assert!(!cited_by[0].is_empty());

    let sample: Vec<Pmid> = cited_by[0].iter().take(20).cloned().collect();
    let docs = client.summaries(&sample).await.unwrap();
    assert_eq!(docs.len(), sample.len());
    assert!(docs.iter().any(|d| !d.authors.is_empty()));
}

#[tokio::test]
async fn test_live_exclusion_removes_source_authors() {
    let client = create_client();
    let source_authors = client.metadata(&[Pmid::from(pmids::JINEK_2012)]).await.unwrap();
    let pipeline = CitationPipeline::new(client, GroupingMode::Strict);

    let report = pipeline
        .run(&CitingAuthorsRequest::pmids(
            vec![Pmid::from(pmids::JINEK_2012)],
            ExclusionPolicy::ExcludeSource,
        ))
        .await
        .unwrap();

    assert!(report.total_edges > 0);
    for author in &source_authors[0] {
        assert!(report.row(author).is_none(), "{author} should be excluded");
    }
    println!("top citing authors: {:?}", &report.rows[..report.rows.len().min(5)]);
}
