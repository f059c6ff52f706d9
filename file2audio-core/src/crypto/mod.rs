pub mod password_cipher;
