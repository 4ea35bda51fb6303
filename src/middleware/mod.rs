pub mod response;
pub mod session;

pub use response::{ApiResponse, ApiResult};
pub use session::{
    clear_session_cookie, session_cookie, session_middleware, session_token, CurrentUser, Locals,
};
