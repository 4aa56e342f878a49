pub mod kind;
pub mod room;
pub mod teachers;
pub mod title;

use super::chunks::Chunk;
use super::Profile;

/// Fields pulled out of one chunk.
#[derive(Debug)]
pub struct Fields {
    pub title: String,
    pub room: Option<String>,
    pub teachers: Option<String>,
    pub kind: Option<String>,
}

/// Run every field extractor over one chunk. The room is looked for on the
/// time-range line first (rooms are usually listed inline right after the
/// hours); the chunk body is only consulted when that yields nothing.
pub fn extract_all(chunk: &Chunk, profile: &Profile) -> Fields {
    let body: Vec<&str> = chunk.body.iter().map(String::as_str).collect();

    let inline = if chunk.after_time.is_empty() {
        None
    } else {
        room::extract(&[chunk.after_time.as_str()], profile)
    };
    let room = inline.or_else(|| room::extract(&body, profile));

    let kind = kind::extract(&body, profile);
    let teachers = teachers::extract(&body);
    let title = title::choose(&body, room.as_deref(), kind.as_deref(), profile);

    Fields {
        title,
        room,
        teachers,
        kind,
    }
}
