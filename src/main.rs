use bevy::prelude::*;
use checkers_ui::CheckersUiPlugin;

fn main() {
    App::new()
        .add_plugins(CheckersUiPlugin)
        .run();
}
