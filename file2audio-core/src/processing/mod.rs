pub mod archive;
pub mod container_header;
pub mod pcm;
pub mod wav_format;
