//! The scraper: merge, order, paginate and project query results.

use skimmer_fetch::{fetch_all, HttpSource, PageSource, DEFAULT_WORKERS};

use crate::content::{Content, SourceKey};
use crate::error::{Error, Result};
use crate::matcher::{Matcher, RecordFilter};
use crate::ordering::{compare_records, Dir, OrderBy};
use crate::record::Record;
use crate::selectors::Selector;
use crate::value::Value;

/// Scrapes structured records out of one or more content units.
///
/// Content units and the selector/filter configuration persist across
/// queries; the query parameters (ordering, skip, take, reverse, column
/// selection) are transient and reset after every execution, so the
/// same content set can be re-queried with different parameters.
///
/// # Example
///
/// ```
/// use skimmer::{Dir, Field, RegexSelector, Scraper};
///
/// let fields = vec![Field::new("n", 1)];
/// let mut scraper = Scraper::new();
/// scraper
///     .add_content("3 1 2")
///     .with(Box::new(RegexSelector::new(r"(\d)", fields)));
///
/// let records = scraper.order_by("n", Dir::Asc).get().unwrap();
/// assert_eq!(records[0].get("n").unwrap().to_string(), "1");
/// ```
pub struct Scraper {
    contents: Vec<Content>,
    matcher: Option<Matcher>,
    pending_filter: Option<RecordFilter>,
    source: Box<dyn PageSource>,
    orderings: Vec<OrderBy>,
    skip: usize,
    take: Option<usize>,
    reversed: bool,
    columns: Option<Vec<String>>,
}

impl Scraper {
    /// Creates a scraper that fetches URLs over plain HTTP.
    pub fn new() -> Self {
        Scraper::with_source(Box::new(HttpSource::default()))
    }

    /// Creates a scraper with a custom page source, e.g. a stub for
    /// tests or a TLS-capable client.
    pub fn with_source(source: Box<dyn PageSource>) -> Self {
        Scraper {
            contents: Vec::new(),
            matcher: None,
            pending_filter: None,
            source,
            orderings: Vec::new(),
            skip: 0,
            take: None,
            reversed: false,
            columns: None,
        }
    }

    // ========================================================================
    // Content
    // ========================================================================

    /// Adds a content unit, keyed by its positional index.
    pub fn add_content(&mut self, body: impl Into<String>) -> &mut Self {
        let key = SourceKey::Index(self.contents.len());
        self.contents.push(Content::new(key, body));
        self
    }

    /// Adds a content unit with an explicit key. The key is passed to
    /// per-field transforms so they know which unit a value came from.
    pub fn add_content_keyed(&mut self, body: impl Into<String>, key: impl Into<String>) -> &mut Self {
        self.contents
            .push(Content::new(SourceKey::Named(key.into()), body));
        self
    }

    /// Fetches a URL and adds its body as a content unit keyed by the URL.
    pub fn add_url(&mut self, url: &str) -> Result<&mut Self> {
        let body = self.source.fetch(url)?;
        self.contents
            .push(Content::new(SourceKey::Named(url.to_string()), body));
        Ok(self)
    }

    /// Fetches several URLs concurrently and adds them in input order.
    ///
    /// Fetching happens in a bounded worker pool; a single failure
    /// aborts the whole batch without adding any content.
    pub fn add_urls(&mut self, urls: &[&str]) -> Result<&mut Self> {
        let bodies = fetch_all(self.source.as_ref(), urls, DEFAULT_WORKERS)?;
        for (url, body) in urls.iter().zip(bodies) {
            self.contents
                .push(Content::new(SourceKey::Named((*url).to_string()), body));
        }
        Ok(self)
    }

    /// Drops every content unit. The selector and filter stay.
    pub fn clear_contents(&mut self) -> &mut Self {
        self.contents.clear();
        self
    }

    // ========================================================================
    // Matching configuration
    // ========================================================================

    /// Sets the extraction strategy to use.
    pub fn with(&mut self, selector: Box<dyn Selector>) -> &mut Self {
        let mut matcher = Matcher::new(selector);
        if let Some(filter) = self.pending_filter.take() {
            matcher.set_filter(filter);
        }
        self.matcher = Some(matcher);
        self
    }

    /// Sets a record-level filter. Records for which the predicate
    /// returns `false` are dropped and logged.
    pub fn filter(&mut self, predicate: impl Fn(&Record) -> bool + 'static) -> &mut Self {
        match &mut self.matcher {
            Some(matcher) => matcher.set_filter(Box::new(predicate)),
            // No selector yet; hold on to the filter until with() runs.
            None => self.pending_filter = Some(Box::new(predicate)),
        }
        self
    }

    // ========================================================================
    // Query parameters (transient, reset after execution)
    // ========================================================================

    /// Appends an ordering key. Multiple calls compose tie-breaks in
    /// call order.
    pub fn order_by(&mut self, field: impl Into<String>, dir: Dir) -> &mut Self {
        self.orderings.push(OrderBy::new(field, dir));
        self
    }

    /// Appends an ordering key with a projection applied to both sides
    /// before comparison.
    pub fn order_by_with(
        &mut self,
        field: impl Into<String>,
        dir: Dir,
        projection: impl Fn(&Value) -> Value + 'static,
    ) -> &mut Self {
        self.orderings
            .push(OrderBy::with_projection(field, dir, projection));
        self
    }

    /// Appends an ascending ordering key.
    pub fn order_asc(&mut self, field: impl Into<String>) -> &mut Self {
        self.order_by(field, Dir::Asc)
    }

    /// Appends a descending ordering key.
    pub fn order_desc(&mut self, field: impl Into<String>) -> &mut Self {
        self.order_by(field, Dir::Desc)
    }

    /// Skips the first `n` records of the merged result sequence.
    pub fn skip(&mut self, n: usize) -> &mut Self {
        self.skip = n;
        self
    }

    /// Keeps at most `n` records after skipping.
    pub fn take(&mut self, n: usize) -> &mut Self {
        self.take = Some(n);
        self
    }

    /// Emits the final result sequence in reverse.
    ///
    /// Reversal applies to the merged, ordered, paginated sequence -
    /// the very last processing step, not a reordering of content units.
    pub fn reverse(&mut self) -> &mut Self {
        self.reversed = true;
        self
    }

    /// Restricts result records to the given columns, preserving each
    /// record's own field order.
    pub fn select(&mut self, columns: &[&str]) -> &mut Self {
        self.columns = Some(columns.iter().map(|c| (*c).to_string()).collect());
        self
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Runs the query and returns all matching records.
    pub fn get(&mut self) -> Result<Vec<Record>> {
        self.execute()
    }

    /// Runs the query and returns the first record, if any.
    pub fn first(&mut self) -> Result<Option<Record>> {
        Ok(self.execute()?.into_iter().next())
    }

    /// Runs the query and returns the last record, if any.
    pub fn last(&mut self) -> Result<Option<Record>> {
        Ok(self.execute()?.pop())
    }

    /// Runs the query and counts the records it produces.
    ///
    /// The count reflects the full pipeline, including skip/take:
    /// `take(2)` caps the count at 2. This matches the query's output,
    /// not the raw match total.
    pub fn count(&mut self) -> Result<usize> {
        Ok(self.execute()?.len())
    }

    /// Diagnostics from the most recent execution.
    pub fn logs(&self) -> &[String] {
        self.matcher.as_ref().map(Matcher::logs).unwrap_or(&[])
    }

    /// The actual scraping: merge, order, paginate, project, reverse.
    ///
    /// Post-condition on success: the transient query parameters are
    /// reset to their defaults; content units and the matcher
    /// configuration persist for the next query. A failed execution
    /// leaves the parameters pending, so they apply to the next
    /// successful query.
    fn execute(&mut self) -> Result<Vec<Record>> {
        if self.contents.is_empty() {
            return Err(Error::ContentNotFound);
        }
        let matcher = self.matcher.as_mut().ok_or(Error::SelectorNotFound)?;

        // Logs describe one execution at a time.
        matcher.clear_logs();

        let mut results = Vec::new();
        for content in &self.contents {
            results.extend(matcher.run(content)?);
        }

        if !results.is_empty() {
            if !self.orderings.is_empty() {
                // Stable: ties keep their merged-sequence order, which
                // keeps pagination reproducible.
                results.sort_by(|a, b| compare_records(a, b, &self.orderings));
            }

            if self.skip > 0 || self.take.is_some() {
                let keep = self.take.unwrap_or(usize::MAX);
                results = results.into_iter().skip(self.skip).take(keep).collect();
            }

            if let Some(columns) = &self.columns {
                results = results.iter().map(|r| r.project(columns)).collect();
            }
        }

        if self.reversed {
            results.reverse();
        }

        self.clear_query();
        Ok(results)
    }

    /// Resets the transient query parameters.
    fn clear_query(&mut self) {
        self.orderings.clear();
        self.skip = 0;
        self.take = None;
        self.reversed = false;
        self.columns = None;
    }
}

impl Default for Scraper {
    fn default() -> Self {
        Scraper::new()
    }
}
