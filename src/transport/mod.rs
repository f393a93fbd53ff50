//! Transport layer: wire-format details (serialization/deserialization).

mod messages;
mod resources;

pub use messages::{
    decode_schedule_message_json_response, decode_send_message_json_response,
    encode_schedule_message_body, encode_send_message_body,
};
pub use resources::{
    decode_account_json_response, decode_delivery_json_response, decode_schedule_json_response,
    decode_schedules_json_response, decode_user_json_response, decode_users_json_response,
};
