use std::time::Duration;

use bevy::prelude::*;
use constants::assets::{
    BODY_FONT, BRIDE_IMAGES, GROOM_IMAGES, MAPS_URL, NAME_FONT, TITLE_FONT,
};
use constants::render_settings::{
    BODY_FONT_SIZE, INDICATOR_IDLE, INDICATOR_SIZE_PX, INK, PAPER, SECTION_Z_BACK,
    TITLE_FONT_SIZE,
};
use constants::timing::{SECTION_COUNT, TITLE_INTRO_DELAY, TITLE_INTRO_FADE};

use crate::engine::animation::ease::Ease;
use crate::engine::animation::tween::fade_at;
use crate::engine::core::routes::{NavigateTo, Route};
use crate::engine::handoff::mailbox::{ScrollHandoff, SectionTag};
use crate::engine::loading::sequencer::LoadingSequencer;
use crate::engine::sections::parallax::ParallaxLayer;
use crate::engine::sections::systems::{SectionElement, SectionIndicator, SectionRoot};
use crate::engine::systems::opacity::Fadeable;
use crate::platform;

const ARCH_WIDTH_PX: f32 = 224.0;
const ARCH_RADIUS_PX: f32 = 120.0;
const TITLE_DROP_PX: f32 = 50.0;
const QR_SIZE_PX: f32 = 192.0;
const DARK_ARCH: Color = Color::srgb(0.204, 0.204, 0.204);
const MAP_BADGE: Color = Color::srgb(0.325, 0.282, 0.306);

const COUPLE: (&str, &str) = ("Hồng Sơn", "Thu Trang");
const VENUE: (&str, &str) = ("Thôn Bách Nhẫn, Xã Mai Trung,", "Huyện Hiệp Hoà, Tỉnh Bắc Giang");

/// Where a caption sits relative to the section's arch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Right,
    Above,
}

/// One fade-marked element of a section, in stagger order.
#[derive(Debug, Clone, PartialEq)]
pub enum Piece {
    Caption {
        anchor: Anchor,
        lines: Vec<(&'static str, &'static str, f32)>,
    },
    Arch {
        color: Color,
        emblem: Option<&'static str>,
    },
    Art(&'static str),
    QrToggle(&'static str),
    MapsLink,
}

/// Text and artwork of one invitation page.
#[derive(Debug, Clone)]
pub struct InvitationCopy {
    pub title: &'static str,
    pub background: &'static str,
    pub sections: [Vec<Piece>; SECTION_COUNT],
}

impl InvitationCopy {
    pub fn for_route(route: Route) -> Self {
        let images = match route {
            Route::Bride => BRIDE_IMAGES,
            Route::Groom | Route::Home => GROOM_IMAGES,
        };

        Self {
            title: "Happy Wedding",
            background: images[0],
            sections: [
                vec![
                    Piece::Caption {
                        anchor: Anchor::Left,
                        lines: vec![(COUPLE.0, NAME_FONT, 44.0)],
                    },
                    Piece::Caption {
                        anchor: Anchor::Right,
                        lines: vec![(COUPLE.1, NAME_FONT, 44.0)],
                    },
                    Piece::Arch {
                        color: PAPER,
                        emblem: Some(images[4]),
                    },
                    Piece::Art(images[1]),
                ],
                vec![
                    Piece::Caption {
                        anchor: Anchor::Above,
                        lines: vec![
                            ("Chạm vào bông hoa", BODY_FONT, 24.0),
                            ("để mừng cưới cho tụi mình nha.", BODY_FONT, 24.0),
                            ("Thank Youu!", NAME_FONT, 26.0),
                        ],
                    },
                    Piece::Arch {
                        color: DARK_ARCH,
                        emblem: None,
                    },
                    Piece::Art(images[2]),
                    Piece::QrToggle(images[5]),
                ],
                vec![
                    Piece::Caption {
                        anchor: Anchor::Left,
                        lines: vec![
                            ("Chủ nhật / Thứ Hai", BODY_FONT, 30.0),
                            ("Ngày 13-14.07.2025", BODY_FONT, 16.0),
                        ],
                    },
                    Piece::Caption {
                        anchor: Anchor::Right,
                        lines: vec![(VENUE.0, BODY_FONT, 30.0), (VENUE.1, BODY_FONT, 16.0)],
                    },
                    Piece::Arch {
                        color: PAPER,
                        emblem: None,
                    },
                    Piece::Art(images[3]),
                    Piece::MapsLink,
                ],
            ],
        }
    }

    pub fn section_counts(&self) -> Vec<usize> {
        self.sections.iter().map(Vec::len).collect()
    }
}

/// Background, dark scrim and scroll hint; they follow the page fade-in.
#[derive(Component)]
pub struct PageContent;

/// The page heading. Drops in and fades after the overlay has gone.
#[derive(Component, Debug, Default)]
pub struct PageTitle {
    elapsed: Duration,
}

impl PageTitle {
    pub fn opacity(&self) -> f32 {
        fade_at(self.elapsed, TITLE_INTRO_DELAY, TITLE_INTRO_FADE, Ease::OutCubic)
    }

    pub fn drop_offset(&self) -> f32 {
        -TITLE_DROP_PX * (1.0 - self.opacity())
    }
}

#[derive(Component)]
pub struct HomeButton;

#[derive(Component)]
pub struct QrToggle;

#[derive(Component)]
pub struct QrPopup;

#[derive(Component)]
pub struct MapsLink;

fn absolute_fill() -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(0.0),
        top: Val::Px(0.0),
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        ..default()
    }
}

pub fn spawn_invitation_page(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    route: Res<State<Route>>,
) {
    let route = *route.get();
    let copy = InvitationCopy::for_route(route);

    commands.spawn((Camera2d, StateScoped(route)));
    commands
        .spawn((
            absolute_fill(),
            BackgroundColor(Color::BLACK),
            StateScoped(route),
        ))
        .with_children(|page| {
            spawn_backdrop(page, &asset_server, copy.background);
            spawn_title(page, &asset_server, copy.title);
            for (section, pieces) in copy.sections.iter().enumerate() {
                spawn_section(page, &asset_server, section, pieces);
            }
            spawn_chrome(page, &asset_server, copy.sections.len());
        });
}

fn spawn_backdrop(page: &mut ChildSpawnerCommands, asset_server: &AssetServer, image: &'static str) {
    page.spawn(Node {
        position_type: PositionType::Absolute,
        left: Val::Percent(-5.0),
        top: Val::Percent(-5.0),
        width: Val::Percent(110.0),
        height: Val::Percent(110.0),
        ..default()
    })
    .with_children(|frame| {
        frame.spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            ImageNode {
                image: asset_server.load(image),
                color: Color::srgba(0.55, 0.55, 0.55, 1.0),
                ..default()
            },
            ParallaxLayer::background(),
            Fadeable::opaque(),
            PageContent,
        ));
    });

    let scrim = Color::srgba(0.0, 0.0, 0.0, 0.3);
    page.spawn((
        absolute_fill(),
        BackgroundColor(scrim),
        Fadeable::new(scrim.alpha()),
        PageContent,
    ));
}

fn spawn_title(page: &mut ChildSpawnerCommands, asset_server: &AssetServer, title: &'static str) {
    page.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(30.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        ZIndex(50),
    ))
    .with_children(|row| {
        row.spawn((Node::default(), ParallaxLayer::title()))
            .with_children(|layer| {
                layer.spawn((
                    Text::new(title),
                    TextFont {
                        font: asset_server.load(TITLE_FONT),
                        font_size: TITLE_FONT_SIZE * 1.6,
                        ..default()
                    },
                    TextColor(Color::WHITE.with_alpha(0.0)),
                    Node::default(),
                    Fadeable::opaque(),
                    PageTitle::default(),
                ));
            });
    });
}

fn spawn_section(
    page: &mut ChildSpawnerCommands,
    asset_server: &AssetServer,
    section: usize,
    pieces: &[Piece],
) {
    page.spawn((
        Node {
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::FlexEnd,
            align_items: AlignItems::Center,
            ..absolute_fill()
        },
        ZIndex(SECTION_Z_BACK),
        Visibility::Hidden,
        SectionRoot(section),
    ))
    .with_children(|root| {
        root.spawn(Node {
            width: Val::Percent(80.0),
            max_width: Val::Px(900.0),
            height: Val::Vh(66.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        })
        .with_children(|stage| {
            for (order, piece) in pieces.iter().enumerate() {
                let element = SectionElement { section, order };
                spawn_piece(stage, asset_server, element, piece);
            }
        });
    });
}

fn spawn_piece(
    stage: &mut ChildSpawnerCommands,
    asset_server: &AssetServer,
    element: SectionElement,
    piece: &Piece,
) {
    match piece {
        Piece::Caption { anchor, lines } => {
            let mut anchor_node = Node {
                position_type: PositionType::Absolute,
                flex_direction: FlexDirection::Column,
                ..default()
            };
            match anchor {
                Anchor::Left => {
                    anchor_node.left = Val::Percent(4.0);
                    anchor_node.top = Val::Percent(25.0);
                }
                Anchor::Right => {
                    anchor_node.right = Val::Percent(4.0);
                    anchor_node.top = Val::Percent(25.0);
                    anchor_node.align_items = AlignItems::FlexEnd;
                }
                Anchor::Above => {
                    anchor_node.top = Val::Px(-110.0);
                    anchor_node.width = Val::Percent(100.0);
                    anchor_node.align_items = AlignItems::Center;
                }
            }
            stage.spawn(anchor_node).with_children(|anchored| {
                anchored
                    .spawn((
                        Node {
                            flex_direction: FlexDirection::Column,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        ParallaxLayer::element(element.order),
                    ))
                    .with_children(|layer| {
                        for (line, font, size) in lines {
                            layer.spawn((
                                Text::new(*line),
                                TextFont {
                                    font: asset_server.load(*font),
                                    font_size: *size,
                                    ..default()
                                },
                                TextColor(Color::WHITE.with_alpha(0.0)),
                                Fadeable::opaque(),
                                element,
                            ));
                        }
                    });
            });
        }
        Piece::Arch { color, emblem } => {
            stage
                .spawn((
                    Node {
                        width: Val::Px(ARCH_WIDTH_PX),
                        height: Val::Percent(100.0),
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::top(Val::Px(40.0)),
                        ..default()
                    },
                    BorderRadius::top(Val::Px(ARCH_RADIUS_PX)),
                    BackgroundColor(color.with_alpha(0.0)),
                    Fadeable::new(color.alpha()),
                    ParallaxLayer::element(element.order),
                    element,
                ))
                .with_children(|arch| {
                    if let Some(emblem) = emblem {
                        arch.spawn((
                            Node {
                                width: Val::Px(64.0),
                                height: Val::Px(64.0),
                                ..default()
                            },
                            ImageNode::new(asset_server.load(*emblem)),
                            Fadeable::opaque(),
                            element,
                        ));
                    }
                });
        }
        Piece::Art(image) => {
            stage
                .spawn((
                    Node {
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::FlexEnd,
                        ..absolute_fill()
                    },
                    ZIndex(40),
                ))
                .with_children(|frame| {
                    frame.spawn((
                        Node {
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        ImageNode {
                            image: asset_server.load(*image),
                            color: Color::WHITE.with_alpha(0.0),
                            ..default()
                        },
                        Fadeable::opaque(),
                        element,
                    ));
                });
        }
        Piece::QrToggle(qr) => {
            stage
                .spawn((
                    Button,
                    Node {
                        position_type: PositionType::Absolute,
                        width: Val::Px(ARCH_WIDTH_PX),
                        height: Val::Percent(100.0),
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                    ZIndex(45),
                    BackgroundColor(Color::NONE),
                    Fadeable::new(0.0),
                    QrToggle,
                    element,
                ))
                .with_children(|area| {
                    area.spawn((
                        Node {
                            position_type: PositionType::Absolute,
                            top: Val::Px(-QR_SIZE_PX - 48.0),
                            padding: UiRect::all(Val::Px(24.0)),
                            display: Display::None,
                            ..default()
                        },
                        BorderRadius::all(Val::Px(24.0)),
                        BackgroundColor(Color::WHITE),
                        ZIndex(60),
                        QrPopup,
                    ))
                    .with_children(|popup| {
                        popup.spawn((
                            Node {
                                width: Val::Px(QR_SIZE_PX),
                                height: Val::Px(QR_SIZE_PX),
                                ..default()
                            },
                            ImageNode::new(asset_server.load(*qr)),
                        ));
                    });
                });
        }
        Piece::MapsLink => {
            stage
                .spawn((
                    Button,
                    Node {
                        position_type: PositionType::Absolute,
                        width: Val::Px(ARCH_WIDTH_PX),
                        height: Val::Percent(100.0),
                        justify_content: JustifyContent::Center,
                        padding: UiRect::top(Val::Px(32.0)),
                        ..default()
                    },
                    ZIndex(45),
                    BackgroundColor(Color::NONE),
                    Fadeable::new(0.0),
                    MapsLink,
                    element,
                ))
                .with_children(|area| {
                    area.spawn((
                        Node {
                            width: Val::Px(56.0),
                            height: Val::Px(56.0),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        BorderRadius::MAX,
                        BackgroundColor(MAP_BADGE.with_alpha(0.0)),
                        Fadeable::opaque(),
                        element,
                    ))
                    .with_children(|badge| {
                        badge.spawn((
                            Text::new("Maps"),
                            TextFont {
                                font: asset_server.load(BODY_FONT),
                                font_size: BODY_FONT_SIZE * 0.8,
                                ..default()
                            },
                            TextColor(Color::WHITE.with_alpha(0.0)),
                            Fadeable::opaque(),
                            element,
                        ));
                    });
                });
        }
    }
}

fn spawn_chrome(page: &mut ChildSpawnerCommands, asset_server: &AssetServer, sections: usize) {
    page.spawn((
        Button,
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(24.0),
            left: Val::Px(24.0),
            padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
            ..default()
        },
        ZIndex(50),
        HomeButton,
    ))
    .with_children(|button| {
        button.spawn((
            Text::new("Trang chủ"),
            TextFont {
                font: asset_server.load(BODY_FONT),
                font_size: BODY_FONT_SIZE,
                ..default()
            },
            TextColor(Color::WHITE),
        ));
    });

    page.spawn((
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(24.0),
            top: Val::Percent(45.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(12.0),
            ..default()
        },
        ZIndex(50),
    ))
    .with_children(|rail| {
        for index in 0..sections {
            rail.spawn((
                Button,
                Node {
                    width: Val::Px(INDICATOR_SIZE_PX),
                    height: Val::Px(INDICATOR_SIZE_PX),
                    ..default()
                },
                BorderRadius::MAX,
                BackgroundColor(INDICATOR_IDLE),
                SectionIndicator(index),
            ));
        }
    });

    page.spawn((
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(32.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        ZIndex(500),
    ))
    .with_children(|hint| {
        hint.spawn((
            Text::new("Lướt xuống nha"),
            TextFont {
                font: asset_server.load(BODY_FONT),
                font_size: BODY_FONT_SIZE * 0.9,
                ..default()
            },
            TextColor(INK.with_alpha(0.0)),
            Fadeable::new(INK.alpha()),
            PageContent,
        ));
    });
}

pub fn fade_page_content(
    sequencer: Res<LoadingSequencer>,
    mut parts: Query<
        (
            &Fadeable,
            Option<&mut TextColor>,
            Option<&mut ImageNode>,
            Option<&mut BackgroundColor>,
        ),
        With<PageContent>,
    >,
) {
    let opacity = sequencer.content_opacity();
    for (fadeable, text, image, background) in &mut parts {
        fadeable.apply(opacity, text, image, background);
    }
}

pub fn animate_page_title(
    time: Res<Time>,
    sequencer: Res<LoadingSequencer>,
    mut titles: Query<(&mut PageTitle, &Fadeable, &mut TextColor, &mut Node)>,
) {
    if !sequencer.is_revealed() {
        return;
    }
    for (mut title, fadeable, text, mut node) in &mut titles {
        title.elapsed += time.delta();
        fadeable.apply(title.opacity(), Some(text), None, None);
        node.top = Val::Px(title.drop_offset());
    }
}

pub fn go_home(
    buttons: Query<&Interaction, (Changed<Interaction>, With<HomeButton>)>,
    mut handoff: ResMut<ScrollHandoff>,
    mut navigate: EventWriter<NavigateTo>,
) {
    for interaction in &buttons {
        if *interaction == Interaction::Pressed {
            handoff.set_target_section(Some(SectionTag::Experience));
            navigate.write(NavigateTo(Route::Home));
        }
    }
}

pub fn toggle_qr(
    buttons: Query<&Interaction, (Changed<Interaction>, With<QrToggle>)>,
    mut popups: Query<&mut Node, With<QrPopup>>,
) {
    for interaction in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        for mut node in &mut popups {
            node.display = match node.display {
                Display::None => Display::Flex,
                _ => Display::None,
            };
        }
    }
}

pub fn open_maps_link(buttons: Query<&Interaction, (Changed<Interaction>, With<MapsLink>)>) {
    for interaction in &buttons {
        if *interaction == Interaction::Pressed {
            if let Err(err) = platform::open_in_new_context(MAPS_URL) {
                warn!("Could not open the venue map: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_pages_share_the_section_layout() {
        let groom = InvitationCopy::for_route(Route::Groom);
        let bride = InvitationCopy::for_route(Route::Bride);
        assert_eq!(groom.section_counts(), vec![4, 4, 5]);
        assert_eq!(groom.section_counts(), bride.section_counts());
        assert_ne!(groom.background, bride.background);
    }

    #[test]
    fn interactive_pieces_live_in_their_sections() {
        let copy = InvitationCopy::for_route(Route::Bride);
        assert!(copy.sections[1].iter().any(|piece| matches!(piece, Piece::QrToggle(_))));
        assert!(copy.sections[2].contains(&Piece::MapsLink));
    }

    #[test]
    fn title_drops_in_after_its_delay() {
        let mut title = PageTitle::default();
        assert_eq!(title.opacity(), 0.0);
        assert_eq!(title.drop_offset(), -TITLE_DROP_PX);
        title.elapsed = TITLE_INTRO_DELAY + TITLE_INTRO_FADE;
        assert_eq!(title.opacity(), 1.0);
        assert_eq!(title.drop_offset(), 0.0);
    }
}
