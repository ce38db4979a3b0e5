// ABOUTME: Renders a table snapshot as a few lines of console text.
// ABOUTME: Pure formatting; never touches the running table.

use std::fmt::Write;

use symposium::prelude::*;

/// Width of one philosopher column.
const COLUMN: usize = 6;

/// Clears the terminal and moves the cursor home.
pub const CLEAR: &str = "\x1b[H\x1b[J";

/// Format `snapshot` as a ruler, a state row, a fork row, and a meals row.
///
/// States: `E` eating, `H` hungry, `T` thinking, `X` done, `S` stopped.
/// Forks show the id of the philosopher holding them, or `-` when free.
pub fn render(snapshot: &TableSnapshot) -> String {
    let n = snapshot.philosophers.len();
    let mut out = String::new();

    let _ = writeln!(out, "{}", "=".repeat(n * COLUMN + 8));

    out.push_str("state  ");
    for p in &snapshot.philosophers {
        let _ = write!(out, "{:>COLUMN$}", p.state.code());
    }
    out.push('\n');

    out.push_str("forks  ");
    for fork in &snapshot.forks {
        let cell = match fork.holder {
            Some(holder) => holder.to_string(),
            None => "-".to_string(),
        };
        let _ = write!(out, "{:>COLUMN$}", cell);
    }
    out.push('\n');

    out.push_str("meals  ");
    for p in &snapshot.philosophers {
        let _ = write!(out, "{:>COLUMN$}", p.remaining_meals);
    }
    let _ = writeln!(out, "   eating: {}", snapshot.eating_count());

    out
}
