use bevy::{
    prelude::*,
    sprite::{MaterialMesh2dBundle, Mesh2dHandle},
    tasks::{AsyncComputeTaskPool, Task},
    window::{PresentMode, WindowResolution},
};
use checkers_core::{Color as PieceColor, Move, Position};
use checkers_engine::{ClickOutcome, Difficulty, GameSession, AI_THINK_DELAY};
use futures_lite::future;

const SQUARE_SIZE: f32 = 80.0;
const PIECE_RADIUS: f32 = SQUARE_SIZE * 0.38;
const CROWN_RADIUS: f32 = SQUARE_SIZE * 0.16;
const INDICATOR_RADIUS: f32 = SQUARE_SIZE * 0.14;
// Board is shifted left to leave room for the status panel
const BOARD_ORIGIN: Vec2 = Vec2::new(-140.0, 0.0);

const LIGHT_SQUARE: Color = Color::rgb(0.93, 0.85, 0.72);
const DARK_SQUARE: Color = Color::rgb(0.45, 0.30, 0.20);

pub struct CheckersUiPlugin;

#[derive(Resource, Default)]
struct GameState {
    session: GameSession,
}

// Kept apart from GameState so ticking the timer does not count as a board change
#[derive(Resource)]
struct AiPacing {
    ai_thinking_timer: Timer,
    ai_task: Option<Task<Option<Move>>>,
}

impl Default for AiPacing {
    fn default() -> Self {
        Self {
            ai_thinking_timer: Timer::new(AI_THINK_DELAY, TimerMode::Once),
            ai_task: None,
        }
    }
}

impl AiPacing {
    fn cancel(&mut self) {
        // Dropping a task cancels it
        self.ai_task = None;
        self.ai_thinking_timer.reset();
    }
}

#[derive(Resource)]
struct BoardAssets {
    piece_mesh: Mesh2dHandle,
    crown_mesh: Mesh2dHandle,
    indicator_mesh: Mesh2dHandle,
    red: Handle<ColorMaterial>,
    black: Handle<ColorMaterial>,
    crown: Handle<ColorMaterial>,
    indicator: Handle<ColorMaterial>,
}

#[derive(Component)]
struct CheckersBoard;

/// Highlights, indicators and pieces: everything rebuilt when the session changes.
#[derive(Component)]
struct BoardOverlay;

#[derive(Component)]
struct StatusText;

#[derive(Component)]
struct AiThinkingText;

impl Plugin for CheckersUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Checkers".into(),
                resolution: WindowResolution::new(1000.0, 760.0),
                present_mode: PresentMode::AutoVsync,
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::rgb(0.12, 0.12, 0.14)))
        .init_resource::<GameState>()
        .init_resource::<AiPacing>()
        .add_systems(Startup, setup)
        .add_systems(Update, (
            handle_input,
            update_ai,
            refresh_board_view,
            update_ui_text,
        ).chain());
    }
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.insert_resource(BoardAssets {
        piece_mesh: meshes.add(shape::Circle::new(PIECE_RADIUS).into()).into(),
        crown_mesh: meshes.add(shape::Circle::new(CROWN_RADIUS).into()).into(),
        indicator_mesh: meshes.add(shape::Circle::new(INDICATOR_RADIUS).into()).into(),
        red: materials.add(ColorMaterial::from(Color::rgb(0.78, 0.12, 0.12))),
        black: materials.add(ColorMaterial::from(Color::rgb(0.08, 0.08, 0.08))),
        crown: materials.add(ColorMaterial::from(Color::rgb(0.95, 0.78, 0.20))),
        indicator: materials.add(ColorMaterial::from(Color::rgba(0.2, 0.85, 0.3, 0.7))),
    });

    // Camera
    commands.spawn(Camera2dBundle::default());

    // Board frame
    let board_size = 8.0 * SQUARE_SIZE;
    commands.spawn((
        SpriteBundle {
            sprite: Sprite {
                color: Color::rgb(0.25, 0.15, 0.08),
                custom_size: Some(Vec2::splat(board_size + 20.0)),
                ..default()
            },
            transform: Transform::from_translation(BOARD_ORIGIN.extend(0.0)),
            ..default()
        },
        CheckersBoard,
    ));

    // Squares
    for position in Position::all() {
        commands.spawn(
            SpriteBundle {
                sprite: Sprite {
                    color: if position.is_playable() { DARK_SQUARE } else { LIGHT_SQUARE },
                    custom_size: Some(Vec2::splat(SQUARE_SIZE)),
                    ..default()
                },
                transform: Transform::from_translation(square_to_world(position, 1.0)),
                ..default()
            },
        );
    }

    spawn_ui(&mut commands);
}

fn spawn_ui(commands: &mut Commands) {
    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: 24.0,
                color: Color::WHITE,
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(40.0),
            right: Val::Px(30.0),
            ..default()
        }),
        StatusText,
    ));

    commands.spawn((
        TextBundle::from_section(
            "AI is thinking...",
            TextStyle {
                font_size: 28.0,
                color: Color::rgb(0.95, 0.78, 0.20),
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            bottom: Val::Px(40.0),
            right: Val::Px(30.0),
            ..default()
        }),
        AiThinkingText,
    ));
}

/// Center of `pos` in world coordinates. Row 0, red's home row, is at the top.
fn square_to_world(pos: Position, z: f32) -> Vec3 {
    Vec3::new(
        BOARD_ORIGIN.x + (pos.col as f32 - 3.5) * SQUARE_SIZE,
        BOARD_ORIGIN.y + (3.5 - pos.row as f32) * SQUARE_SIZE,
        z,
    )
}

fn world_to_square(world: Vec2) -> Option<Position> {
    let col = ((world.x - BOARD_ORIGIN.x) / SQUARE_SIZE + 4.0).floor();
    let row = (4.0 - (world.y - BOARD_ORIGIN.y) / SQUARE_SIZE).floor();
    if row < 0.0 || col < 0.0 {
        return None;
    }
    Position::new(row as u8, col as u8)
}

fn handle_input(
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    mouse_button: Res<Input<MouseButton>>,
    keys: Res<Input<KeyCode>>,
    mut game_state: ResMut<GameState>,
    mut pacing: ResMut<AiPacing>,
) {
    if keys.just_pressed(KeyCode::N) {
        pacing.cancel();
        game_state.session.new_game();
        return;
    }
    if keys.just_pressed(KeyCode::A) {
        pacing.cancel();
        game_state.session.toggle_ai();
        return;
    }
    if keys.just_pressed(KeyCode::Key1) {
        game_state.session.set_difficulty(Difficulty::Easy);
    }
    if keys.just_pressed(KeyCode::Key2) {
        game_state.session.set_difficulty(Difficulty::Medium);
    }

    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    let window = windows.single();
    let (camera, camera_transform) = camera_q.single();

    let clicked = window
        .cursor_position()
        .and_then(|cursor| camera.viewport_to_world(camera_transform, cursor))
        .map(|ray| ray.origin.truncate())
        .and_then(world_to_square);

    if let Some(position) = clicked {
        match game_state.session.handle_click(position) {
            ClickOutcome::Moved(mv) => debug!("Player moved {}", mv),
            ClickOutcome::Selected(pos) => debug!("Selected piece on {}", pos),
            ClickOutcome::Deselected | ClickOutcome::Ignored => {}
        }
    }
}

fn update_ai(
    time: Res<Time>,
    mut game_state: ResMut<GameState>,
    mut pacing: ResMut<AiPacing>,
) {
    if pacing.ai_task.is_none() {
        if !game_state.session.ai_to_move() {
            return;
        }

        pacing.ai_thinking_timer.tick(time.delta());
        if !pacing.ai_thinking_timer.finished() {
            return;
        }

        if let Some(request) = game_state.session.begin_ai_turn() {
            let thread_pool = AsyncComputeTaskPool::get();
            pacing.ai_task = Some(thread_pool.spawn(async move { request.run() }));
        }
        return;
    }

    if let Some(mut task) = pacing.ai_task.take() {
        if let Some(ai_move) = future::block_on(future::poll_once(&mut task)) {
            game_state.session.finish_ai_turn(ai_move);
            pacing.ai_thinking_timer.reset();
        } else {
            pacing.ai_task = Some(task);
        }
    }
}

fn refresh_board_view(
    mut commands: Commands,
    game_state: Res<GameState>,
    assets: Res<BoardAssets>,
    overlays: Query<Entity, With<BoardOverlay>>,
) {
    if !game_state.is_changed() {
        return;
    }

    for entity in overlays.iter() {
        commands.entity(entity).despawn_recursive();
    }

    let session = &game_state.session;

    // Selected square
    if let Some(selected) = session.selected() {
        commands.spawn((
            SpriteBundle {
                sprite: Sprite {
                    color: Color::rgba(0.95, 0.85, 0.25, 0.6),
                    custom_size: Some(Vec2::splat(SQUARE_SIZE)),
                    ..default()
                },
                transform: Transform::from_translation(square_to_world(selected, 1.5)),
                ..default()
            },
            BoardOverlay,
        ));
    }

    // Pieces
    for (position, piece) in session.board().pieces() {
        let material = match piece.color {
            PieceColor::Red => assets.red.clone(),
            PieceColor::Black => assets.black.clone(),
        };

        let mut entity = commands.spawn((
            MaterialMesh2dBundle {
                mesh: assets.piece_mesh.clone(),
                material,
                transform: Transform::from_translation(square_to_world(position, 2.0)),
                ..default()
            },
            BoardOverlay,
        ));

        if piece.is_king() {
            entity.with_children(|parent| {
                parent.spawn(MaterialMesh2dBundle {
                    mesh: assets.crown_mesh.clone(),
                    material: assets.crown.clone(),
                    transform: Transform::from_xyz(0.0, 0.0, 0.1),
                    ..default()
                });
            });
        }
    }

    // Legal destinations of the selected piece
    for valid_move in session.valid_moves() {
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: assets.indicator_mesh.clone(),
                material: assets.indicator.clone(),
                transform: Transform::from_translation(square_to_world(valid_move.to, 3.0)),
                ..default()
            },
            BoardOverlay,
        ));
    }
}

fn update_ui_text(
    game_state: Res<GameState>,
    pacing: Res<AiPacing>,
    mut status_query: Query<&mut Text, With<StatusText>>,
    mut thinking_query: Query<&mut Visibility, With<AiThinkingText>>,
) {
    let session = &game_state.session;

    if let Ok(mut visibility) = thinking_query.get_single_mut() {
        let thinking = session.is_ai_thinking() || pacing.ai_task.is_some() || session.ai_to_move();
        *visibility = if thinking {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }

    if !game_state.is_changed() {
        return;
    }

    if let Ok(mut text) = status_query.get_single_mut() {
        let ai = session.ai_config();
        text.sections[0].value = format!(
            "{}\n\nRed captured: {}\nBlack captured: {}\n\nPlay vs AI: {}\nDifficulty: {}\n\n[N] new game\n[A] toggle AI\n[1] easy  [2] medium",
            session.status_message(),
            session.captured_black(),
            session.captured_red(),
            if ai.enabled { "on" } else { "off" },
            ai.difficulty,
        );
    }
}
