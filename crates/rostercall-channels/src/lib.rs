//! # Rostercall Channels
//! Outbound delivery for roster announcements.

pub mod groupchat;

pub use groupchat::GroupChatChannel;
