use breed_browser_core::{
    BrowserConfig, DogApiClient, FetchStatus, FlashToken, JumpField, PageController,
    PageFetchResult, PageMarker, PageSource, PendingFetches, Record,
};
use iced::widget::{Column, Row, button, column, container, row, scrollable, text, text_input};
use iced::{Element, Length, Task};
use std::sync::Arc;
use std::time::Duration;

// Card grid dimensions
const GRID_COLUMNS: usize = 5;
const CARD_WIDTH: f32 = 190.0;
const CARD_HEIGHT: f32 = 90.0;

const ERROR_RED: iced::Color = iced::Color::from_rgb(0.86, 0.21, 0.27);
const MUTED: iced::Color = iced::Color::from_rgb(0.45, 0.45, 0.45);

#[derive(Debug, Clone)]
pub enum Message {
    // Fetch lifecycle
    PageSettled(u32, PageFetchResult),

    // Pager navigation
    GoToPage(u32),
    PrevPage,
    NextPage,
    FirstPage,

    // Jump box
    JumpInputChanged(String),
    JumpSubmitted,
    ResetJumpError(FlashToken),
}

pub struct AppState {
    controller: PageController<PendingFetches>,
    client: Arc<DogApiClient>,
    jump_field: JumpField,
    input_error_duration: Duration,
}

impl AppState {
    pub fn new(config: &BrowserConfig, client: DogApiClient) -> Self {
        Self {
            controller: PageController::new(PendingFetches::new()),
            client: Arc::new(client),
            jump_field: JumpField::new(),
            input_error_duration: config.input_error_duration(),
        }
    }

    /// Turn every fetch the controller dispatched into a task.
    fn drain_fetches(&mut self) -> Task<Message> {
        let tasks: Vec<Task<Message>> = self
            .controller
            .dispatcher_mut()
            .drain()
            .into_iter()
            .map(|page| {
                let client = Arc::clone(&self.client);
                Task::perform(async move { client.fetch_page(page).await }, move |result| {
                    Message::PageSettled(page, result)
                })
            })
            .collect();
        Task::batch(tasks)
    }
}

pub fn initialize(config: BrowserConfig, client: DogApiClient) -> (AppState, Task<Message>) {
    let mut state = AppState::new(&config, client);
    state.controller.mount();
    let task = state.drain_fetches();
    (state, task)
}

pub fn update(state: &mut AppState, message: Message) -> Task<Message> {
    match message {
        Message::PageSettled(page, result) => {
            let outcome = state.controller.on_fetch_settled(page, result);
            log::debug!("Page {} settled: {:?}", page, outcome);
        }
        Message::GoToPage(page) => {
            if let Err(e) = state.controller.request_page(i64::from(page)) {
                log::debug!("Ignoring pager click: {}", e);
            }
        }
        Message::PrevPage => {
            if let Err(e) = state.controller.prev_page() {
                log::debug!("Ignoring previous: {}", e);
            }
        }
        Message::NextPage => {
            if let Err(e) = state.controller.next_page() {
                log::debug!("Ignoring next: {}", e);
            }
        }
        Message::FirstPage => {
            if let Err(e) = state.controller.first_page() {
                log::debug!("Ignoring first page: {}", e);
            }
        }
        Message::JumpInputChanged(value) => {
            state.jump_field.set_text(value);
        }
        Message::JumpSubmitted => match state.controller.jump_to_page(state.jump_field.text()) {
            Ok(page) => {
                log::debug!("Jumping to page {}", page);
                state.jump_field.accept();
            }
            Err(e) => {
                log::debug!("Rejected jump input: {}", e);
                let token = state.jump_field.reject();
                let delay = state.input_error_duration;
                return Task::perform(
                    async move { tokio::time::sleep(delay).await },
                    move |_| Message::ResetJumpError(token),
                );
            }
        },
        Message::ResetJumpError(token) => {
            state.jump_field.reset_after(token);
        }
    }

    state.drain_fetches()
}

fn breed_card(record: &Record) -> Element<'_, Message> {
    let photo_note = if record.image_url.is_some() {
        "Photo available"
    } else {
        "No photo"
    };

    container(
        column![
            text(&record.label).size(16),
            text(photo_note).size(12).color(MUTED),
        ]
        .spacing(6),
    )
    .style(container::rounded_box)
    .padding(10)
    .width(Length::Fixed(CARD_WIDTH))
    .height(Length::Fixed(CARD_HEIGHT))
    .into()
}

fn breed_grid(items: &[Record]) -> Element<'_, Message> {
    Column::with_children(items.chunks(GRID_COLUMNS).map(|chunk| {
        Row::with_children(chunk.iter().map(breed_card))
            .spacing(12)
            .into()
    }))
    .spacing(12)
    .into()
}

fn pager_row(state: &AppState) -> Element<'_, Message> {
    let controller = &state.controller;
    let current_page = controller.state().current_page;

    let markers: Vec<Element<Message>> = controller
        .markers()
        .into_iter()
        .map(|marker| match marker {
            PageMarker::Page(page) => {
                let style: fn(&iced::Theme, button::Status) -> button::Style =
                    if page == current_page {
                        button::primary
                    } else {
                        button::secondary
                    };
                button(text(page.to_string()))
                    .on_press(Message::GoToPage(page))
                    .style(style)
                    .padding(8)
                    .into()
            }
            PageMarker::Ellipsis => text("...").color(MUTED).into(),
        })
        .collect();

    row![
        button("Previous")
            .on_press_maybe(controller.can_go_prev().then_some(Message::PrevPage))
            .padding(8),
        Row::with_children(markers).spacing(6),
        button("Next")
            .on_press_maybe(controller.can_go_next().then_some(Message::NextPage))
            .padding(8),
    ]
    .spacing(10)
    .into()
}

fn jump_row(state: &AppState) -> Element<'_, Message> {
    let is_error = state.jump_field.is_error();
    let placeholder = state.controller.state().current_page.to_string();

    let input = text_input(&placeholder, state.jump_field.text())
        .on_input(Message::JumpInputChanged)
        .on_submit(Message::JumpSubmitted)
        .width(Length::Fixed(80.0))
        .style(move |theme, status| {
            let mut style = text_input::default(theme, status);
            if is_error {
                style.border.color = ERROR_RED;
                style.border.width = 2.0;
            }
            style
        });

    let showing = match state.controller.showing_range() {
        Some((start, end)) => format!(
            "Showing {}-{} of {} breeds",
            start,
            end,
            state.controller.state().total_items
        ),
        None => String::new(),
    };

    row![
        text("Jump to page:").size(14),
        input,
        button("Go").on_press(Message::JumpSubmitted).padding(8),
        text(showing).size(14).color(MUTED),
    ]
    .spacing(10)
    .into()
}

fn error_panel(state: &AppState) -> Element<'_, Message> {
    let title = state
        .controller
        .error_kind()
        .map(|kind| kind.title())
        .unwrap_or_default();
    let message = state
        .controller
        .state()
        .error_message
        .clone()
        .unwrap_or_default();

    container(
        column![
            text(title).size(22).color(ERROR_RED),
            text(message).size(14),
            button("Go to First Page")
                .on_press(Message::FirstPage)
                .padding(10),
        ]
        .spacing(12),
    )
    .style(container::rounded_box)
    .padding(20)
    .width(Length::Fixed(460.0))
    .into()
}

pub fn view(state: &AppState) -> Element<'_, Message> {
    let page_state = state.controller.state();

    let header = column![
        text("Dog Breeds Directory").size(32),
        text("Explore amazing dog breeds from around the world")
            .size(16)
            .color(MUTED),
    ]
    .spacing(6);

    let body: Element<Message> = match page_state.status {
        FetchStatus::Error => error_panel(state),
        FetchStatus::Idle | FetchStatus::Loading if page_state.items.is_empty() => {
            text("Loading breeds...").size(16).color(MUTED).into()
        }
        _ if page_state.items.is_empty() => text("No breeds on this page.").size(16).into(),
        status => {
            let loading_note = if status == FetchStatus::Loading {
                format!("Loading page {}...", page_state.current_page)
            } else {
                String::new()
            };
            column![
                text(loading_note).size(12).color(MUTED),
                breed_grid(&page_state.items),
                pager_row(state),
                jump_row(state),
            ]
            .spacing(20)
            .into()
        }
    };

    let footer = text("Powered by your amazing backend API").size(12).color(MUTED);

    scrollable(
        container(column![header, body, footer].spacing(30))
            .padding(20)
            .width(Length::Fill),
    )
    .into()
}
