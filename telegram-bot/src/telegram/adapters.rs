//! Adapters from teloxide types to core types.

use wbot_core::{Chat, Message, MessageDirection, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> TelegramUserWrapper<'a> {
    pub fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> TelegramMessageWrapper<'a> {
    pub fn to_core(&self) -> Message {
        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: 0,
                    username: None,
                    first_name: None,
                    last_name: None,
                }),
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: format!("{:?}", self.0.chat.kind),
            },
            content: self.0.text().unwrap_or("").to_string(),
            message_type: "text".to_string(),
            direction: MessageDirection::Incoming,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Wraps a teloxide CallbackQuery for conversion to core [`Message`].
///
/// `content` carries the button's callback data; `id` is the id of the
/// message holding the keyboard (what "Pin message" pins).
pub struct CallbackQueryWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl<'a> CallbackQueryWrapper<'a> {
    /// Returns None when Telegram did not include the originating message
    /// (too old or inaccessible) or the query has no data.
    pub fn to_core(&self) -> Option<Message> {
        let origin = self.0.message.as_ref()?;
        let data = self.0.data.as_ref()?;

        Some(Message {
            id: origin.id().to_string(),
            user: TelegramUserWrapper(&self.0.from).to_core(),
            chat: Chat {
                id: origin.chat().id.0,
                chat_type: format!("{:?}", origin.chat().kind),
            },
            content: data.clone(),
            message_type: "callback".to_string(),
            direction: MessageDirection::Incoming,
            created_at: chrono::Utc::now(),
        })
    }
}
