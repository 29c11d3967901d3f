//! Main chat event loop
//!
//! Polls the terminal for key and paste events, routes them through the
//! chat form, applies finished exchanges and redraws. Everything here runs
//! on one task; exchanges run on their own tasks and report back over the
//! controller's channel.

mod lifecycle;

pub use lifecycle::{restore_terminal, setup_terminal, ChatTerminal};

use std::{error::Error, sync::Arc, time::Duration};

use ratatui::backend::Backend;
use ratatui::crossterm::event::{self, Event};
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing::info;

use crate::core::chat_transport::{ChatTransport, HttpTransport};
use crate::core::config::ChatSettings;
use crate::core::controller::{ChatUiController, ExchangeEvent, LoopAction};
use crate::ui::conversation::ConversationView;
use crate::ui::form::{ChatForm, FormAction};
use crate::ui::input_field::InputField;
use crate::ui::renderer::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub async fn run_chat(settings: ChatSettings) -> Result<(), Box<dyn Error>> {
    let transport: Arc<dyn ChatTransport> = Arc::new(HttpTransport::new(settings.endpoint.clone()));
    let (mut controller, mut exchanges) = ChatUiController::new(
        ChatForm::new(),
        ConversationView::new(),
        InputField::new(),
        transport,
    );

    let mut terminal = setup_terminal()?;
    info!(endpoint = %settings.endpoint, "chat session started");

    let result = event_loop(&mut terminal, &mut controller, &mut exchanges).await;
    restore_terminal(&mut terminal)?;

    let pending = controller.in_flight();
    if pending > 0 {
        info!(pending, "session ended with replies still pending");
    }
    info!(messages = controller.messages().len(), "chat session ended");

    result
}

/// Drive the session until the form asks to quit.
pub async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    controller: &mut ChatUiController,
    exchanges: &mut mpsc::UnboundedReceiver<ExchangeEvent>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(f, controller))?;

        if event::poll(POLL_INTERVAL)? {
            let action = match event::read()? {
                Event::Key(key) => controller.form().handle_key(key),
                Event::Paste(text) => controller.form().handle_paste(text),
                // Resizes are picked up by the next draw.
                _ => FormAction::Ignore,
            };
            if controller.handle_action(action) == LoopAction::Quit {
                return Ok(());
            }
        }

        // Give exchange tasks spawned on this worker a chance to run.
        tokio::task::yield_now().await;
        drain_exchanges(controller, exchanges);
    }
}

/// Apply every exchange that has finished since the last pass.
pub fn drain_exchanges(
    controller: &mut ChatUiController,
    exchanges: &mut mpsc::UnboundedReceiver<ExchangeEvent>,
) -> usize {
    let mut applied = 0;
    while let Ok(event) = exchanges.try_recv() {
        controller.on_exchange_complete(event);
        applied += 1;
    }
    applied
}
