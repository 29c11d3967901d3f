//! One request/response cycle per submission.
//!
//! The controller owns the three screen elements and is only touched from
//! the UI task. Each submission spawns a task that performs the POST and
//! sends its outcome back over a channel; the event loop hands those
//! outcomes to [`ChatUiController::on_exchange_complete`]. Exchanges are
//! never retried or cancelled, and concurrent exchanges render in whatever
//! order they finish.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::core::chat_transport::{ChatTransport, ExchangeError};
use crate::core::message::Message;
use crate::ui::conversation::ConversationView;
use crate::ui::form::{ChatForm, FormAction, ScrollAction};
use crate::ui::input_field::InputField;
use crate::utils::input::trim_submission;

pub type ExchangeId = u64;

/// Outcome of one finished exchange.
#[derive(Debug)]
pub struct ExchangeEvent {
    pub id: ExchangeId,
    pub outcome: Result<String, ExchangeError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    Continue,
    Quit,
}

pub struct ChatUiController {
    form: ChatForm,
    messages: ConversationView,
    input: InputField,
    transport: Arc<dyn ChatTransport>,
    tx: mpsc::UnboundedSender<ExchangeEvent>,
    next_exchange_id: ExchangeId,
    in_flight: usize,
}

impl ChatUiController {
    pub fn new(
        form: ChatForm,
        messages: ConversationView,
        input: InputField,
        transport: Arc<dyn ChatTransport>,
    ) -> (Self, mpsc::UnboundedReceiver<ExchangeEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = Self {
            form,
            messages,
            input,
            transport,
            tx,
            next_exchange_id: 1,
            in_flight: 0,
        };
        (controller, rx)
    }

    pub fn form(&self) -> &ChatForm {
        &self.form
    }

    pub fn messages(&self) -> &ConversationView {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut ConversationView {
        &mut self.messages
    }

    pub fn input(&self) -> &InputField {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputField {
        &mut self.input
    }

    /// Exchanges submitted whose outcome has not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn endpoint_description(&self) -> String {
        self.transport.describe()
    }

    /// Submit whatever the input field holds.
    ///
    /// Blank input is ignored without touching anything. Otherwise the
    /// trimmed text is rendered as a user message, the field is cleared and
    /// one exchange is dispatched. Must be called inside a tokio runtime.
    pub fn on_submit(&mut self) -> Option<ExchangeId> {
        let text = trim_submission(&self.input.value()).to_string();
        if text.is_empty() {
            return None;
        }

        self.render(Message::user(text.clone()));
        self.input.clear();

        let id = self.next_exchange_id;
        self.next_exchange_id += 1;
        self.in_flight += 1;
        debug!(exchange = id, chars = text.chars().count(), "submitting message");

        let transport = Arc::clone(&self.transport);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = transport.send(&text).await;
            // The receiver is gone once the session ends; the reply is dropped.
            let _ = tx.send(ExchangeEvent { id, outcome });
        });

        Some(id)
    }

    /// Apply a finished exchange: render the reply, or report the failure on
    /// the diagnostic channel and leave the view alone.
    pub fn on_exchange_complete(&mut self, event: ExchangeEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match event.outcome {
            Ok(reply) => {
                debug!(exchange = event.id, chars = reply.chars().count(), "reply received");
                self.render(Message::bot(reply));
            }
            Err(err) => {
                error!(exchange = event.id, error = %err, "chat exchange failed");
            }
        }
    }

    pub fn handle_action(&mut self, action: FormAction) -> LoopAction {
        match action {
            FormAction::Submit => {
                self.on_submit();
            }
            FormAction::Edit(edit) => self.input.apply(edit),
            FormAction::Scroll(scroll) => match scroll {
                ScrollAction::Up(lines) => self.messages.scroll_up(lines),
                ScrollAction::Down(lines) => self.messages.scroll_down(lines),
                ScrollAction::PageUp => self.messages.page_up(),
                ScrollAction::PageDown => self.messages.page_down(),
                ScrollAction::Bottom => self.messages.scroll_to_bottom(),
            },
            FormAction::Quit => return LoopAction::Quit,
            FormAction::Ignore => {}
        }
        LoopAction::Continue
    }

    fn render(&mut self, message: Message) {
        self.messages.append(message);
        self.messages.scroll_to_bottom();
    }
}
