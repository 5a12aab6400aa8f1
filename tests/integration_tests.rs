// Integration tests - driving the app end to end through key events

mod common;
mod e2e;
