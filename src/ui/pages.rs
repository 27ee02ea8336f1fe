/// One view per booth page
///
/// Each page is rendered from the session alone, plus the few pieces of
/// transient UI state the application keeps next to it (live camera frame,
/// palette item being held).
use iced::alignment::{Horizontal, Vertical};
use iced::widget::image::Handle;
use iced::widget::text::Shaping;
use iced::widget::{
    button, canvas, column, container, image, mouse_area, row, text, Space, Stack,
};
use iced::{Alignment, Background, Color, ContentFit, Element, Length, Pixels, Theme};
use iced_aw::Wrap;

use super::assets::Assets;
use super::canvas::StickerCanvas;
use super::progress::ProgressRing;
use crate::config::KioskConfig;
use crate::i18n::Language;
use crate::state::data::{DecorationTab, Page, Style, STYLES};
use crate::state::session::{Session, PROGRESS_CAP};
use crate::Message;

/// Everything a page needs to render
pub struct PageContext<'a> {
    pub session: &'a Session,
    pub assets: &'a Assets,
    pub config: &'a KioskConfig,
    pub live_frame: Option<&'a Handle>,
    pub held: Option<&'static str>,
}

/// Build the current page with the global home button on top
pub fn view<'a>(ctx: PageContext<'a>) -> Element<'a, Message> {
    let page = match ctx.session.page() {
        Page::Home => home(&ctx),
        Page::Style => style(&ctx),
        Page::Capture => capture(&ctx),
        Page::Generating => generating(&ctx),
        Page::Decoration => decoration(&ctx),
    };

    let mut layers: Vec<Element<'a, Message>> = Vec::new();
    if let Some(background) = &ctx.assets.background {
        layers.push(
            image(background.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Cover)
                .into(),
        );
    }
    layers.push(page);
    layers.push(
        container(
            button(text("🏠").size(40).shaping(Shaping::Advanced))
                .on_press(Message::Home)
                .padding(12)
                .style(button::secondary),
        )
        .padding(24)
        .width(Length::Fill)
        .align_x(Horizontal::Right)
        .into(),
    );

    Stack::with_children(layers)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn home<'a>(ctx: &PageContext<'a>) -> Element<'a, Message> {
    let labels = ctx.session.language().labels();

    let title: Element<'a, Message> = match &ctx.assets.logo {
        Some(logo) => image(logo.clone()).width(Length::Fixed(560.0)).into(),
        None => text("AI Photo Booth").size(72).into(),
    };

    let language_buttons: Vec<Element<'a, Message>> = Language::ALL
        .iter()
        .map(|&language| {
            button(text(format!("> {}", language.native_name())).size(32))
                .on_press(Message::LanguageSelected(language))
                .padding([12, 32])
                .into()
        })
        .collect();

    let content = column![
        title,
        row![
            text("🌐").size(44).shaping(Shaping::Advanced),
            text(labels.select_language).size(36),
        ]
        .spacing(15)
        .align_y(Alignment::Center),
        row(language_buttons).spacing(24),
    ]
    .spacing(40)
    .align_x(Alignment::Center);

    // Pose pictures pinned to the four corners
    let placements = [
        (Horizontal::Left, Vertical::Top),
        (Horizontal::Right, Vertical::Top),
        (Horizontal::Left, Vertical::Bottom),
        (Horizontal::Right, Vertical::Bottom),
    ];
    let mut layers: Vec<Element<'a, Message>> = Vec::new();
    for (corner, (align_x, align_y)) in ctx.assets.corners.iter().zip(placements) {
        if let Some(handle) = corner {
            layers.push(
                container(image(handle.clone()).width(Length::Fixed(260.0)))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(align_x)
                    .align_y(align_y)
                    .into(),
            );
        }
    }
    layers.push(centered(content));

    Stack::with_children(layers)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn style<'a>(ctx: &PageContext<'a>) -> Element<'a, Message> {
    let language = ctx.session.language();
    let labels = language.labels();
    let selected = ctx.session.selected_style();

    let cards: Vec<Element<'a, Message>> = STYLES
        .iter()
        .map(|style| {
            let preview: Element<'a, Message> = match ctx.assets.style_thumbnail(style.id) {
                Some(handle) => image(handle.clone())
                    .width(Length::Fixed(220.0))
                    .height(Length::Fixed(220.0))
                    .content_fit(ContentFit::Cover)
                    .into(),
                None => swatch(accent(style), 220.0, 220.0),
            };

            button(
                column![preview, text(style.name(language)).size(26)]
                    .spacing(10)
                    .align_x(Alignment::Center),
            )
            .on_press(Message::StyleSelected(style.id))
            .padding(12)
            .style(if selected == Some(style.id) {
                button::success
            } else {
                button::secondary
            })
            .into()
        })
        .collect();

    let start = button(text(labels.start_capture).size(32))
        .padding([14, 48])
        .on_press_maybe(selected.map(|_| Message::StartCapture));

    centered(
        column![
            text(labels.choose_style).size(44),
            Wrap::with_elements(cards).spacing(Pixels(24.0)),
            start,
        ]
        .spacing(40)
        .align_x(Alignment::Center),
    )
}

fn capture<'a>(ctx: &PageContext<'a>) -> Element<'a, Message> {
    let session = ctx.session;
    let labels = session.language().labels();
    let (width, height) = (ctx.config.photo_width, ctx.config.photo_height);

    let photo: Element<'a, Message> = match (session.captured(), ctx.live_frame) {
        (Some(still), _) => photo_image(still.handle.clone(), width, height),
        (None, Some(frame)) => photo_image(frame.clone(), width, height),
        (None, None) => swatch(Color::BLACK, width, height),
    };

    let mut layers = vec![photo];
    if session.countdown_running() {
        layers.push(
            container(text(session.countdown().to_string()).size(180))
                .width(Length::Fixed(width))
                .height(Length::Fixed(height))
                .align_x(Horizontal::Center)
                .align_y(Vertical::Center)
                .into(),
        );
    }

    let controls: Element<'a, Message> = if session.captured().is_some() {
        row![
            button(text(labels.retake).size(30))
                .on_press(Message::Retake)
                .padding([12, 40])
                .style(button::secondary),
            button(text(labels.done).size(30))
                .on_press(Message::Done)
                .padding([12, 40]),
        ]
        .spacing(30)
        .into()
    } else if session.awaiting_still() {
        // Shutter fired; the still may never arrive if the camera had no frame
        button(text(labels.retake).size(30))
            .on_press(Message::Retake)
            .padding([12, 40])
            .style(button::secondary)
            .into()
    } else {
        text(labels.get_ready).size(36).into()
    };

    centered(
        column![Stack::with_children(layers), controls]
            .spacing(30)
            .align_x(Alignment::Center),
    )
}

fn generating<'a>(ctx: &PageContext<'a>) -> Element<'a, Message> {
    let session = ctx.session;
    let labels = session.language().labels();
    let ring_accent = session
        .selected_style()
        .and_then(Style::find)
        .map(accent)
        .unwrap_or(Color::WHITE);

    let mut content = column![
        text(labels.generating).size(40),
        canvas(ProgressRing {
            percent: session.progress(),
            accent: ring_accent,
        })
        .width(Length::Fixed(280.0))
        .height(Length::Fixed(280.0)),
    ]
    .spacing(40)
    .align_x(Alignment::Center);

    if session.progress() >= PROGRESS_CAP {
        content = content.push(text(labels.almost_there).size(30));
    }

    centered(content)
}

fn decoration<'a>(ctx: &PageContext<'a>) -> Element<'a, Message> {
    let session = ctx.session;
    let language = session.language();
    let labels = language.labels();
    let (width, height) = (ctx.config.photo_width, ctx.config.photo_height);

    let photo = match session.captured() {
        Some(still) => photo_image(still.handle.clone(), width, height),
        None => swatch(Color::BLACK, width, height),
    };
    let stickers = canvas(StickerCanvas {
        stickers: session.stickers(),
        sticker_size: session.sticker_size(),
        held: ctx.held,
    })
    .width(Length::Fixed(width))
    .height(Length::Fixed(height));

    let tabs: Vec<Element<'a, Message>> = DecorationTab::ALL
        .iter()
        .map(|&tab| {
            button(text(tab.label(language)).size(24))
                .on_press(Message::TabSelected(tab))
                .padding([8, 24])
                .style(if tab == session.decoration_tab() {
                    button::primary
                } else {
                    button::secondary
                })
                .into()
        })
        .collect();

    let palette: Vec<Element<'a, Message>> = session
        .decoration_tab()
        .palette()
        .iter()
        .map(|&emoji| {
            mouse_area(
                container(text(emoji).size(52).shaping(Shaping::Advanced))
                    .padding(10)
                    .style(|_theme: &Theme| container::Style {
                        background: Some(Background::Color(Color::from_rgba(1.0, 1.0, 1.0, 0.08))),
                        ..Default::default()
                    }),
            )
            .on_press(Message::PaletteGrab(emoji))
            .on_release(Message::PaletteTap(emoji))
            .into()
        })
        .collect();

    let controls = row![
        button(text(labels.retake).size(28))
            .on_press(Message::Retake)
            .padding([10, 36])
            .style(button::secondary),
        button(text(labels.clear_stickers).size(28))
            .on_press_maybe((!session.stickers().is_empty()).then_some(Message::ClearStickers))
            .padding([10, 36])
            .style(button::danger),
    ]
    .spacing(30);

    centered(
        column![
            text(labels.decorate).size(40),
            Stack::with_children([photo, stickers.into()]),
            row(tabs).spacing(12),
            Wrap::with_elements(palette).spacing(Pixels(12.0)),
            text(labels.drag_hint).size(20),
            controls,
        ]
        .spacing(24)
        .align_x(Alignment::Center),
    )
}

fn photo_image<'a>(handle: Handle, width: f32, height: f32) -> Element<'a, Message> {
    image(handle)
        .width(Length::Fixed(width))
        .height(Length::Fixed(height))
        .content_fit(ContentFit::Cover)
        .into()
}

/// Solid block standing in for a missing picture
fn swatch<'a>(color: Color, width: f32, height: f32) -> Element<'a, Message> {
    container(Space::new(Length::Fixed(width), Length::Fixed(height)))
        .style(move |_theme: &Theme| container::Style {
            background: Some(Background::Color(color)),
            ..Default::default()
        })
        .into()
}

fn accent(style: &Style) -> Color {
    let [r, g, b] = style.accent;
    Color::from_rgb8(r, g, b)
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
