use std::sync::Arc;
use tokio::{sync::watch, task::JoinHandle};
use tracing::debug;

use crate::provider::BytecodeSource;
use crate::validator::{check_contract, ContractStatus};

/// What the sell form shows for the NFT contract field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    pub input: String,
    pub contract_is_valid: bool,
    pub pending: bool,
    pub generation: u64,
}

/// Outcome of one validation started by `SellForm::edit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub generation: u64,
    pub input: String,
    pub status: ContractStatus,
    /// False when a newer edit superseded this one before it resolved
    pub applied: bool,
}

impl Resolution {
    /// `<input>\t<valid|invalid>` for an applied result, `None` for a discarded one
    pub fn verdict_line(&self) -> Option<String> {
        if !self.applied {
            return None;
        }
        let verdict = if self.status.is_contract() {
            "valid"
        } else {
            "invalid"
        };
        Some(format!("{}\t{}", self.input, verdict))
    }
}

/// Contract input plus its validity slot.
///
/// Every edit is tagged with a generation. Validations are never cancelled;
/// a result whose generation is no longer current is dropped on arrival.
pub struct SellForm<S: ?Sized> {
    source: Option<Arc<S>>,
    state: Arc<watch::Sender<FormSnapshot>>,
}

impl<S> SellForm<S>
where
    S: BytecodeSource + ?Sized + 'static,
{
    pub fn new(source: Option<Arc<S>>) -> Self {
        let (sender, _) = watch::channel(FormSnapshot::default());
        Self {
            source,
            state: Arc::new(sender),
        }
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormSnapshot> {
        self.state.subscribe()
    }

    pub fn edit(&self, input: impl Into<String>) -> JoinHandle<Resolution> {
        let input = input.into();
        let mut generation = 0;
        self.state.send_modify(|s| {
            s.generation += 1;
            s.input = input.clone();
            s.contract_is_valid = false;
            s.pending = true;
            generation = s.generation;
        });

        let source = self.source.clone();
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let status = check_contract(source.as_deref(), &input).await;
            let applied = state.send_if_modified(|s| {
                if s.generation != generation {
                    return false;
                }
                s.contract_is_valid = status.is_contract();
                s.pending = false;
                true
            });
            if !applied {
                debug!(generation, input = %input, "Discarding stale contract validation");
            }
            Resolution {
                generation,
                input,
                status,
                applied,
            }
        })
    }
}
