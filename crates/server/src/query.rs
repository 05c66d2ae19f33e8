//! Answering safe-location queries and reporting the results.

use serde::Serialize;

use safespot_engine::teleport::{self, Kernel, SearchOutcome, SearchParams};
use safespot_engine::world::position::BlockPos;
use safespot_engine::world::view::BlockView;

/// One answered query, in the shape printed by the CLI (`--json` emits one
/// of these per line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryReport {
    pub origin: [i64; 3],
    pub kernel: String,
    pub height: i32,
    pub width: i32,
    pub max_drop: i32,
    /// `None` when nothing safe was found or the search failed.
    pub safe: Option<[i64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryReport {
    pub fn to_line(&self) -> String {
        let [x, y, z] = self.origin;
        match (&self.safe, &self.error) {
            (_, Some(err)) => format!("({x}, {y}, {z}) [{}]: error: {err}", self.kernel),
            (Some([sx, sy, sz]), None) if self.safe == Some(self.origin) => {
                format!("({sx}, {sy}, {sz}) [{}]: already safe", self.kernel)
            }
            (Some([sx, sy, sz]), None) => {
                format!("({x}, {y}, {z}) [{}]: safe at ({sx}, {sy}, {sz})", self.kernel)
            }
            (None, None) => format!("({x}, {y}, {z}) [{}]: no safe location", self.kernel),
        }
    }
}

fn to_array(pos: BlockPos) -> [i64; 3] {
    [pos.x, pos.y, pos.z]
}

/// Run every query in parallel against `view` and report in input order.
pub fn run<V: BlockView + Sync>(view: &V, queries: &[SearchParams], kernel: Kernel) -> Vec<QueryReport> {
    let results = teleport::find_many(view, queries, &kernel);

    queries
        .iter()
        .zip(results)
        .map(|(params, result)| {
            let (safe, error) = match result {
                Ok(SearchOutcome::Found(pos)) => (Some(to_array(pos)), None),
                Ok(SearchOutcome::NotFound) => (None, None),
                Err(e) => {
                    tracing::warn!("Query at {} failed: {}", params.origin, e);
                    (None, Some(e.to_string()))
                }
            };
            QueryReport {
                origin: to_array(params.origin),
                kernel: kernel.to_string(),
                height: params.height,
                width: params.width,
                max_drop: params.max_drop,
                safe,
                error,
            }
        })
        .collect()
}

/// Parse `x,y,z` (spaces allowed around the commas).
pub fn parse_pos(text: &str) -> anyhow::Result<BlockPos> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        anyhow::bail!("expected x,y,z but got {text:?}");
    };
    let coord = |s: &str| {
        s.parse::<i64>()
            .map_err(|e| anyhow::anyhow!("bad coordinate {s:?} in {text:?}: {e}"))
    };
    Ok(BlockPos::new(coord(*x)?, coord(*y)?, coord(*z)?))
}
