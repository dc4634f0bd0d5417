use crate::hints::HintSelector;
use crate::storage::EntryStore;
use crate::suggest::Suggester;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntryStore>,
    pub hints: Arc<HintSelector>,
    pub suggester: Option<Arc<Suggester>>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn EntryStore>,
        hints: HintSelector,
        suggester: Option<Suggester>,
    ) -> Self {
        Self {
            store,
            hints: Arc::new(hints),
            suggester: suggester.map(Arc::new),
        }
    }
}
