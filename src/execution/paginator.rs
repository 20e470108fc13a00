//! Walks `top`/`skip` pages until a short page signals the end.

use crate::error::{ProxyKlientError, Result};
use crate::traits::PageFetcher;
use crate::types::{CallContext, Reportee, ReporteeQuery};
use tracing::{debug, error};

pub struct Paginator<F: PageFetcher> {
    fetcher: F,
    page_size: u32,
}

impl<F: PageFetcher> Paginator<F> {
    pub fn new(fetcher: F, page_size: u32) -> Result<Self> {
        if page_size == 0 {
            return Err(ProxyKlientError::invalid_config("page_size must be greater than 0"));
        }
        Ok(Self { fetcher, page_size })
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch every page for `query`. A page shorter than the page size is the
    /// last one; the first failing page aborts the whole walk.
    pub async fn fetch_all(&self, context: &CallContext, query: &ReporteeQuery) -> Result<Vec<Reportee>> {
        let page_size = self.page_size as usize;
        let mut all_reportees = Vec::new();
        let mut skip: u32 = 0;

        loop {
            let page = self.fetcher.fetch_page(context, query.page(self.page_size, skip)).await?;
            let received = page.len();

            if received > page_size {
                error!(
                    received,
                    page_size,
                    skip,
                    "Received more reportees than requested, keeping all of them"
                );
            }

            all_reportees.extend(page);
            debug!(received, total = all_reportees.len(), skip, "Fetched page of reportees");

            if received != page_size {
                break;
            }

            skip = skip
                .checked_add(self.page_size)
                .ok_or_else(|| ProxyKlientError::client("Too many reportees, paging offset overflowed"))?;
        }

        Ok(all_reportees)
    }
}
