//! Pagination argument types for CLI commands

use clap::Args;

use crate::client::PaginationParams;
use crate::client::pagination::MAX_PAGE_SIZE;

/// Shared pagination arguments for list commands.
#[derive(Args, Debug, Default, Clone)]
pub struct PaginationArgs {
    /// Maximum results to return
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Number of results to skip
    #[arg(long)]
    pub offset: Option<usize>,
}

impl PaginationArgs {
    /// Params for the first page.
    ///
    /// Pages are as large as the API allows unless `--limit` asks for fewer.
    pub fn to_params(&self) -> PaginationParams {
        let mut params = PaginationParams::new().limit(self.limit.unwrap_or(MAX_PAGE_SIZE));
        if let Some(offset) = self.offset {
            params = params.offset(offset);
        }
        params
    }

    /// Keep only the offsets that can contribute to the first `--limit` results.
    pub fn clip_offsets(&self, offsets: Vec<usize>) -> Vec<usize> {
        match self.limit {
            Some(limit) => {
                let end = self.offset.unwrap_or(0) + limit;
                offsets.into_iter().filter(|o| *o < end).collect()
            }
            None => offsets,
        }
    }
}
