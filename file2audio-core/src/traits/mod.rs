pub mod payload_cipher;
