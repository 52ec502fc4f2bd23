/// MP4 output via system `ffmpeg`.
pub mod ffmpeg;
