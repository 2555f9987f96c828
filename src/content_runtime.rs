use std::cell::Cell;
use std::rc::Rc;

use style_explorer_core::PageContent;

/// What the content area shows while derivations come and go.
#[derive(Clone, Debug)]
pub(crate) enum ContentPhase {
    Loading,
    Ready(Rc<PageContent>),
    Failed(String),
}

impl PartialEq for ContentPhase {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Loading, Self::Loading) => true,
            (Self::Ready(a), Self::Ready(b)) => Rc::ptr_eq(a, b),
            (Self::Failed(a), Self::Failed(b)) => a == b,
            _ => false,
        }
    }
}

/// Ticket counter closing the stale-response race: every derivation takes a
/// fresh ticket, and only the holder of the latest ticket may publish its
/// result. Superseded derivations still run to completion (their fetches warm
/// the style cache) but their output is discarded.
#[derive(Debug, Default)]
pub(crate) struct AggregationSeq {
    issued: Cell<u64>,
}

impl AggregationSeq {
    pub(crate) fn issue(&self) -> u64 {
        let next = self.issued.get() + 1;
        self.issued.set(next);
        next
    }

    pub(crate) fn is_current(&self, ticket: u64) -> bool {
        self.issued.get() == ticket
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn spawn_aggregation(
    seq: Rc<AggregationSeq>,
    loader: Rc<style_explorer_core::StyleLoader<crate::loader_source::HttpStyleSource>>,
    catalog: Rc<style_explorer_core::Catalog>,
    selections: style_explorer_core::Selections,
    search_selected_only: bool,
    phase: yew::UseStateHandle<ContentPhase>,
) {
    let ticket = seq.issue();
    phase.set(ContentPhase::Loading);
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = style_explorer_core::aggregate(
            &loader,
            &catalog,
            &selections,
            search_selected_only,
        )
        .await;
        if !seq.is_current(ticket) {
            return;
        }
        match outcome {
            Ok(content) => phase.set(ContentPhase::Ready(Rc::new(content))),
            Err(err) => {
                gloo::console::warn!("content derivation failed:", err.to_string());
                phase.set(ContentPhase::Failed(err.to_string()));
            }
        }
    });
}
