//! Crate-level scenario and property tests

mod rewrite_tests;

use std::sync::Arc;

use crate::Expr;
use crate::visitor::{BaseVisitor, StopFlags, StopVisitor};

/// Route `tracing` output through the test harness; `RUST_LOG` picks the level
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Records the rendering of every visited node and can stop or prune at a
/// given visit index
#[derive(Debug, Default)]
pub(crate) struct Trace {
    pub seen: Vec<String>,
    pub stop_at: Option<usize>,
    pub prune_at: Option<usize>,
    pub flags: StopFlags,
}

impl BaseVisitor for Trace {
    fn bvisit_basic(&mut self, x: &Arc<Expr>) {
        let index = self.seen.len();
        self.seen.push(x.to_string());
        if self.stop_at == Some(index) {
            self.flags.stop = true;
        }
        if self.prune_at == Some(index) {
            self.flags.local_stop = true;
        }
    }
}

impl StopVisitor for Trace {
    fn flags(&self) -> StopFlags {
        self.flags
    }

    fn flags_mut(&mut self) -> &mut StopFlags {
        &mut self.flags
    }
}

/// Reference preorder over `args`: `(rendering, subtree size)` per node
pub(crate) fn reference_preorder(e: &Arc<Expr>) -> Vec<(String, usize)> {
    fn walk(e: &Arc<Expr>, out: &mut Vec<(String, usize)>) {
        let slot = out.len();
        out.push((e.to_string(), 0));
        for child in e.args() {
            walk(&child, out);
        }
        out[slot].1 = out.len() - slot;
    }
    let mut out = Vec::new();
    walk(e, &mut out);
    out
}

/// Reference postorder over `args`
pub(crate) fn reference_postorder(e: &Arc<Expr>) -> Vec<String> {
    let mut out: Vec<String> = e.args().iter().flat_map(reference_postorder).collect();
    out.push(e.to_string());
    out
}
