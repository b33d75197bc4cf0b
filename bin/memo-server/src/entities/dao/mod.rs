pub mod note;

pub use note::NoteRecord;
