use crate::core::controller::ChatUiController;
use crate::ui::layout::ChatLayout;
use ratatui::{
    widgets::{Block, Paragraph},
    Frame,
};

fn conversation_title(controller: &ChatUiController) -> String {
    let mut title = format!(
        "formchat v{} - {}",
        env!("CARGO_PKG_VERSION"),
        controller.endpoint_description()
    );
    match controller.in_flight() {
        0 => {}
        1 => title.push_str(" • 1 reply pending"),
        n => title.push_str(&format!(" • {n} replies pending")),
    }
    title
}

pub fn ui(f: &mut Frame, controller: &mut ChatUiController) {
    let layout = ChatLayout::split(f.area());

    let (width, height) = layout.transcript_viewport();
    controller.messages_mut().set_viewport(width, height);

    // Lines come pre-wrapped and already cut to the viewport.
    let view = controller.messages();
    let messages_paragraph = Paragraph::new(view.visible_lines())
        .block(Block::default().title(conversation_title(controller)));
    f.render_widget(messages_paragraph, layout.conversation);

    // The text area scrolls itself horizontally and draws its own cursor.
    f.render_widget(controller.input().textarea(), layout.input);
}
