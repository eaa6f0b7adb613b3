use std::fmt::Write;
use std::path::Path;

/// Extension named in the rules when the video has none.
const DEFAULT_VIDEO_EXTENSION: &str = ".mp4";

/// Longest name the model is asked to produce, in words.
const MAX_WORDS: usize = 4;

pub fn system_instruction() -> String {
    "You are an assistant that organizes a video library. \
     Read the provided information and reply with one concise, human-readable \
     file name on a single line. Include the file extension."
        .to_string()
}

/// Instruction naming the video and image and listing the naming rules.
pub fn user_instruction(video: &Path, image: &Path) -> String {
    let extension = video
        .extension()
        .map_or_else(|| DEFAULT_VIDEO_EXTENSION.to_string(), |ext| {
            format!(".{}", ext.to_string_lossy())
        });

    let mut prompt = String::from(
        "Suggest a concise file name that brings the content of the video to mind, \
         based on the information below.\n",
    );
    let _ = writeln!(prompt, "- Original video file name: {}", display_name(video));
    let _ = writeln!(prompt, "- Extracted image file name: {}", display_name(image));
    prompt.push_str("Naming rules:\n");
    let _ = writeln!(
        prompt,
        "1. Capitalize the first letter of each word and lowercase the rest, \
         separate words with a single space, and end with {extension}."
    );
    let _ = writeln!(prompt, "2. Use at most {MAX_WORDS} words.");
    prompt.push_str(
        "3. Include elements such as the scene or people that can be inferred \
         from the image or the original name.\n",
    );
    prompt.push_str("4. Output a single line only. No extra explanation.\n");
    prompt
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
