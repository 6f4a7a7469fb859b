pub mod designer;
pub mod guard;
