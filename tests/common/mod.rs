#![allow(dead_code)]

use async_trait::async_trait;
use oi_analyzer::sensibull::config;
use oi_analyzer::sensibull::{BarChart, BrowserSession, ChartRenderer, DomElement};
use oi_analyzer::ScrapeError;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Canned DOM node; a child answers a query when its locator equals the xpath
#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    pub locator: String,
    pub text: String,
    pub children: Vec<FakeElement>,
}

impl FakeElement {
    pub fn new(locator: &str) -> Self {
        Self {
            locator: locator.to_string(),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_child(mut self, child: FakeElement) -> Self {
        self.children.push(child);
        self
    }
}

#[async_trait]
impl DomElement for FakeElement {
    async fn find(&self, xpath: &str) -> Result<Option<Self>, ScrapeError> {
        Ok(self.children.iter().find(|c| c.locator == xpath).cloned())
    }

    async fn find_all(&self, xpath: &str) -> Result<Vec<Self>, ScrapeError> {
        Ok(self
            .children
            .iter()
            .filter(|c| c.locator == xpath)
            .cloned()
            .collect())
    }

    async fn text(&self) -> Result<String, ScrapeError> {
        Ok(self.text.clone())
    }
}

/// Row group holding one stripe row with the given cells
pub fn row_group(group_number: usize, cells: &[&str]) -> FakeElement {
    let mut row = FakeElement::new(config::row_xpath_for_group(group_number));
    for cell in cells {
        row = row.with_child(FakeElement::new(config::CELL_XPATH).with_text(cell));
    }
    FakeElement::new(config::ROW_GROUP_XPATH).with_child(row)
}

/// Table body built from raw cell rows, striped like the live page
pub fn table(rows: &[Vec<&str>]) -> FakeElement {
    let mut body = FakeElement::new(config::TABLE_BODY_XPATH);
    for (idx, cells) in rows.iter().enumerate() {
        body = body.with_child(row_group(idx + 1, cells));
    }
    body
}

/// Eight raw cells for a strike with the given call and put OI
pub fn cells(strike: &str, calls_oi: &str, puts_oi: &str) -> Vec<String> {
    vec![
        "5.2%".to_string(),
        calls_oi.to_string(),
        "101.5".to_string(),
        strike.to_string(),
        "13.4".to_string(),
        "88.2".to_string(),
        puts_oi.to_string(),
        "-".to_string(),
    ]
}

pub fn as_strs(rows: &[Vec<String>]) -> Vec<Vec<&str>> {
    rows.iter()
        .map(|r| r.iter().map(String::as_str).collect())
        .collect()
}

/// Ten strikes from 17000 upwards, call OI peaking at 17400
pub fn sample_rows() -> Vec<Vec<String>> {
    let calls_oi = ["5", "20", "3", "50", "9", "1", "7", "2", "100", "4"];
    calls_oi
        .iter()
        .enumerate()
        .map(|(i, oi)| cells(&(17000 + i * 50).to_string(), oi, &(i * 10 + 1).to_string()))
        .collect()
}

/// Browser page serving a fixed table body
pub struct FakeBrowser {
    pub table: Option<FakeElement>,
    pub refreshes: AtomicUsize,
    pub fail_refresh: bool,
}

impl FakeBrowser {
    pub fn with_table(table: FakeElement) -> Self {
        Self {
            table: Some(table),
            refreshes: AtomicUsize::new(0),
            fail_refresh: false,
        }
    }

    pub fn without_table() -> Self {
        Self {
            table: None,
            refreshes: AtomicUsize::new(0),
            fail_refresh: false,
        }
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowserSession for FakeBrowser {
    type Element = FakeElement;

    async fn refresh(&self) -> Result<(), ScrapeError> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        if self.fail_refresh {
            return Err(ScrapeError::Browser("session lost".to_string()));
        }
        Ok(())
    }

    async fn find(&self, xpath: &str) -> Result<Option<FakeElement>, ScrapeError> {
        if xpath == config::TABLE_BODY_XPATH {
            Ok(self.table.clone())
        } else {
            Ok(None)
        }
    }
}

/// Renderer that records what it was asked to draw
#[derive(Default)]
pub struct RecordingRenderer {
    pub rendered: Mutex<Vec<(String, PathBuf)>>,
}

impl RecordingRenderer {
    pub fn titles(&self) -> Vec<String> {
        self.rendered
            .lock()
            .unwrap()
            .iter()
            .map(|(title, _)| title.clone())
            .collect()
    }
}

impl ChartRenderer for RecordingRenderer {
    fn render(&self, chart: &BarChart, path: &Path) -> Result<(), ScrapeError> {
        self.rendered
            .lock()
            .unwrap()
            .push((chart.title.clone(), path.to_path_buf()));
        Ok(())
    }
}

/// Fresh scratch directory under the system temp dir
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("oi-analyzer-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}
