//! Data models for PropDesk

mod property;
mod user;

pub use property::{parse_inventory, Inventory, NewPropertyInformation, PropertyInformation};
pub use user::{
    ForgotPasswordRequest, MessageResponse, NewUser, SigninRequest, SigninResponse, SignupRequest,
    User, UserResponse,
};
