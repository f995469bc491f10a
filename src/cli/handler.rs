//! Terminal receiver of move requests

use crate::cli::output;
use crate::domain::MoveRequested;
use crate::infrastructure::traits::MoveRequestHandler;

/// Reports each request on stdout as `You moved <account> to <target>`.
#[derive(Debug, Default)]
pub struct PrintingMoveHandler;

impl MoveRequestHandler for PrintingMoveHandler {
    fn handle(&self, event: &MoveRequested) {
        output::moved(event);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::Settings;
    use crate::infrastructure::di::ServiceContainer;

    #[test]
    fn given_printing_handler_when_injected_then_container_delivers_to_it() {
        let container = ServiceContainer::new(Settings::default(), Arc::new(PrintingMoveHandler));

        container.handler.handle(&MoveRequested {
            account_name: "Acct1".into(),
            target_trading_name: "HQ".into(),
        });
    }
}
