use iced::{
    Element, Length,
    widget::{button, column, container, row, text},
};

/// Full-width sidebar button
pub fn action_button<'a, Message: Clone + 'a>(
    label: &'a str,
    on_press: Option<Message>,
) -> Element<'a, Message> {
    button(text(label))
        .on_press_maybe(on_press)
        .width(Length::Fill)
        .padding(6)
        .into()
}

/// Titled group of controls in the left panel
pub fn section<'a, Message: 'a>(
    title: &'a str,
    content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    container(column![text(title).size(14), content.into()].spacing(8))
        .style(container::bordered_box)
        .padding(10)
        .width(Length::Fill)
        .into()
}

/// Left control panel, right canvas with the status bar underneath.
pub fn layout<'a, Message>(
    sidebar: impl Into<Element<'a, Message>>,
    canvas: impl Into<Element<'a, Message>>,
    status: &'a str,
) -> Element<'a, Message>
where
    Message: 'a,
{
    container(
        row![
            container(sidebar.into()).width(Length::Fixed(250.0)),
            column![
                container(canvas.into())
                    .width(Length::Fill)
                    .height(Length::Fill),
                container(text(status))
                    .style(container::bordered_box)
                    .padding(6)
                    .width(Length::Fill),
            ]
            .spacing(10)
            .width(Length::Fill),
        ]
        .spacing(20),
    )
    .padding(20)
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}
