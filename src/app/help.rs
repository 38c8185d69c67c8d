use crate::keys::KeyAction;

const SECTIONS: &[(&str, &[KeyAction])] = &[
    ("Jokes", &[KeyAction::Another, KeyAction::Favorite]),
    ("Favorites", &[KeyAction::Down, KeyAction::Up, KeyAction::Save]),
    ("General", &[KeyAction::Cancel, KeyAction::Help, KeyAction::Quit]),
];

/// Return the help text displayed in the help overlay.
pub fn help_text() -> String {
    let mut text = String::from("dadjokes: one GET away from a groan\n");
    for (title, actions) in SECTIONS {
        text.push_str(&format!("\n{}:\n", title));
        for action in actions.iter() {
            text.push_str(&format!(
                "  {:<8} {}\n",
                action.key_label(),
                action.help_text()
            ));
        }
    }
    text.push_str("\nFavorites are saved when you quit or switch away.\n");
    text.push_str(&format!("\nVersion: {}", env!("CARGO_PKG_VERSION")));
    text
}
