//! インメモリ Repository の実装

mod room;

pub use room::InMemoryRoomRepository;
