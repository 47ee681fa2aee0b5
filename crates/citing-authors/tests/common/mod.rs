//! Shared fixtures: an in-memory bibliographic service and E-utilities XML builders.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use citing_authors::Bibliographic;
use citing_authors::error::{ClientError, ClientResult};
use citing_authors::models::{DocSummary, Pmid};

pub fn pmids(list: &[&str]) -> Vec<Pmid> {
    list.iter().map(|s| Pmid::from(*s)).collect()
}

pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

/// In-memory stand-in for PubMed.
#[derive(Debug, Default)]
pub struct FakeService {
    pub searches: HashMap<String, Vec<Pmid>>,
    pub citations: HashMap<Pmid, Vec<Pmid>>,
    pub authors: HashMap<Pmid, Vec<String>>,
    /// Summary requests touching any of these ids fail.
    pub failing_summaries: HashSet<Pmid>,
    /// Answer summaries only for known ids, without padding.
    pub unaligned_summaries: bool,
    pub summary_calls: AtomicUsize,
}

impl FakeService {
    /// Sources 100 (cited by 1 and 2) and 200 (cited by 3).
    ///
    /// Paper 1 is by A and B, paper 2 by B, paper 3 by C; source 100 is by B.
    pub fn reference() -> Self {
        let mut fake = Self::default();
        fake.searches.insert("crispr".into(), pmids(&["100", "200"]));
        fake.cite("100", &["1", "2"]).cite("200", &["3"]);
        fake.write("1", &["A", "B"]).write("2", &["B"]).write("3", &["C"]);
        fake.write("100", &["B"]).write("200", &[]);
        fake
    }

    pub fn cite(&mut self, source: &str, citing: &[&str]) -> &mut Self {
        self.citations.insert(source.into(), pmids(citing));
        self
    }

    pub fn write(&mut self, pmid: &str, authors: &[&str]) -> &mut Self {
        self.authors.insert(pmid.into(), names(authors));
        self
    }

    pub fn summary_calls(&self) -> usize {
        self.summary_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Bibliographic for FakeService {
    async fn search(&self, query: &str) -> ClientResult<Vec<Pmid>> {
        Ok(self.searches.get(query).cloned().unwrap_or_default())
    }

    async fn cited_by(&self, ids: &[Pmid]) -> ClientResult<Vec<Vec<Pmid>>> {
        Ok(ids.iter().map(|id| self.citations.get(id).cloned().unwrap_or_default()).collect())
    }

    async fn summaries(&self, ids: &[Pmid]) -> ClientResult<Vec<DocSummary>> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);

        if ids.iter().any(|id| self.failing_summaries.contains(id)) {
            return Err(ClientError::server(503, "esummary unavailable"));
        }

        let docs = ids.iter().filter_map(|id| {
            match self.authors.get(id) {
                Some(authors) => Some(DocSummary {
                    pmid: id.clone(),
                    title: None,
                    authors: authors.clone(),
                }),
                None if self.unaligned_summaries => None,
                None => Some(DocSummary::empty(id.clone())),
            }
        });
        Ok(docs.collect())
    }
}

pub fn esearch_xml(ids: &[&str]) -> String {
    let id_list: String = ids.iter().map(|id| format!("<Id>{id}</Id>")).collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" ?>
<!DOCTYPE eSearchResult PUBLIC "-//NLM//DTD esearch 20060628//EN" "https://eutils.ncbi.nlm.nih.gov/eutils/dtd/20060628/esearch.dtd">
<eSearchResult><Count>{count}</Count><RetMax>{count}</RetMax><RetStart>0</RetStart><IdList>{id_list}</IdList><TranslationSet/></eSearchResult>"#,
        count = ids.len()
    )
}

pub fn elink_xml(sets: &[(&str, &[&str])]) -> String {
    let mut body = String::from(r#"<?xml version="1.0" encoding="UTF-8" ?><eLinkResult>"#);
    for (source, linked) in sets {
        body.push_str(&format!(
            "<LinkSet><DbFrom>pubmed</DbFrom><IdList><Id>{source}</Id></IdList>"
        ));
        if !linked.is_empty() {
            body.push_str("<LinkSetDb><DbTo>pubmed</DbTo><LinkName>pubmed_pubmed_citedin</LinkName>");
            for id in *linked {
                body.push_str(&format!("<Link><Id>{id}</Id></Link>"));
            }
            body.push_str("</LinkSetDb>");
        }
        body.push_str("</LinkSet>");
    }
    body.push_str("</eLinkResult>");
    body
}

pub fn esummary_xml(docs: &[(&str, Option<&[&str]>)]) -> String {
    let mut body = String::from(r#"<?xml version="1.0" encoding="UTF-8" ?><eSummaryResult>"#);
    for (id, authors) in docs {
        body.push_str(&format!(
            r#"<DocSum><Id>{id}</Id><Item Name="PubDate" Type="Date">2020</Item>"#
        ));
        if let Some(authors) = authors {
            body.push_str(r#"<Item Name="AuthorList" Type="List">"#);
            for author in *authors {
                body.push_str(&format!(r#"<Item Name="Author" Type="String">{author}</Item>"#));
            }
            body.push_str("</Item>");
        }
        body.push_str(&format!(
            r#"<Item Name="Title" Type="String">Paper {id}</Item></DocSum>"#
        ));
    }
    body.push_str("</eSummaryResult>");
    body
}
