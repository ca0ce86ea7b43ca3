//! AutoLISP serialization of a primitive stream.
//!
//! The script runs non-interactively: object snaps are disabled for its
//! duration, every command is fully specified, and the whole drawing is one
//! undo group. Numbers use the shortest round-trip `f64` form so the same
//! drawing always serializes to the same bytes.

use super::primitives::{Drawing, Primitive};
use crate::layout::Point;

const PREAMBLE: &str = r#"(defun *error* (msg)
  (if (not (member msg '("Function cancelled" "quit / exit abort")))
    (princ (strcat "\nError: " msg))
  )
  (command "_.UNDO" "_END")
  (setvar "OSMODE" old_osmode)
  (setvar "CMDECHO" 1)
  (princ)
)
(setq old_osmode (getvar "OSMODE"))
(setvar "CMDECHO" 0)
(setvar "OSMODE" 0)
(command "_.UNDO" "_BEGIN")
"#;

const EPILOGUE: &str = r#"(command "_.ZOOM" "_E")
(command "_.UNDO" "_END")
(setvar "OSMODE" old_osmode)
(setvar "CMDECHO" 1)
(princ "\nDrawing complete.")
(princ)
"#;

/// Render a drawing as an AutoLISP script.
pub fn render_lisp(drawing: &Drawing) -> String {
    let mut out = String::with_capacity(64 * drawing.len() + PREAMBLE.len() + EPILOGUE.len());
    out.push_str(";; Cabling schematic generated by cableplan\n");
    out.push_str(PREAMBLE);

    for primitive in drawing.primitives() {
        out.push_str(&command(primitive));
        out.push('\n');
    }

    out.push_str(EPILOGUE);
    out
}

/// AutoLISP command line(s) for one primitive, without the trailing newline.
fn command(primitive: &Primitive) -> String {
    match primitive {
        Primitive::Section(name) => format!(
            "\n; === {} ===\n(princ \"\\n{}...\")",
            name,
            escape(name)
        ),
        Primitive::CreateLayer { name, color } => format!(
            "(command \"-LAYER\" \"N\" \"{}\" \"C\" \"{}\" \"{}\" \"\")",
            escape(name),
            color,
            escape(name)
        ),
        Primitive::SelectLayer { name, color } => format!(
            "(command \"-LAYER\" \"S\" \"{}\" \"\")\n(command \"-COLOR\" \"{}\")",
            escape(name),
            color
        ),
        Primitive::Line { from, to } => {
            format!("(command \"_.LINE\" {} {} \"\")", point(*from), point(*to))
        }
        Primitive::Polyline { points, closed } => {
            let vertices: Vec<String> = points.iter().map(|p| point(*p)).collect();
            format!(
                "(command \"_.PLINE\" {} \"{}\")",
                vertices.join(" "),
                if *closed { "C" } else { "" }
            )
        }
        Primitive::Circle { center, radius } => {
            format!("(command \"_.CIRCLE\" {} {})", point(*center), radius)
        }
        Primitive::Text {
            anchor,
            height,
            justification,
            text,
        } => format!(
            "(command \"-TEXT\" \"S\" \"Standard\" \"J\" \"{}\" {} {} 0 \"{}\")",
            justification.code(),
            point(*anchor),
            height,
            escape(text)
        ),
        Primitive::Hatch => "(command \"-HATCH\" \"S\" \"L\" \"\" \"\")".to_string(),
    }
}

fn point(p: Point) -> String {
    format!("(list {} {})", p.x, p.y)
}

/// Escape a string for use inside an AutoLISP string literal.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}
