//! Shinobi 登录 FFI 绑定
//!
//! 提供 C ABI 兼容的接口，供移动端等其他语言宿主调用

use std::ffi::{c_char, c_int, CStr, CString};
use std::ptr;

use shinobi_login_core::{validate, ClientConfig, Error, ShinobiClient};
use tokio::runtime::Runtime;
use tracing::warn;

/// 错误码定义
pub const SHINOBI_OK: c_int = 0;
pub const SHINOBI_ERR_NULL_PTR: c_int = -1;
pub const SHINOBI_ERR_INVALID_SERVER: c_int = -2;
pub const SHINOBI_ERR_INVALID_EMAIL: c_int = -3;
pub const SHINOBI_ERR_INVALID_PASSWORD: c_int = -4;
pub const SHINOBI_ERR_NETWORK: c_int = -5;
pub const SHINOBI_ERR_AUTH: c_int = -6;
pub const SHINOBI_ERR_ENCODING: c_int = -7;

/// 客户端句柄，持有 tokio 运行时和客户端配置
pub struct ShinobiHandle {
    runtime: Runtime,
    config: ClientConfig,
}

fn error_code(error: &Error) -> c_int {
    match error {
        Error::InvalidServer => SHINOBI_ERR_INVALID_SERVER,
        Error::InvalidEmail => SHINOBI_ERR_INVALID_EMAIL,
        Error::InvalidPassword => SHINOBI_ERR_INVALID_PASSWORD,
        Error::RequestFailed(_) => SHINOBI_ERR_NETWORK,
        Error::InvalidCredentials => SHINOBI_ERR_AUTH,
    }
}

/// # Safety
///
/// `s` 必须是以 nul 结尾的合法 C 字符串
unsafe fn cstr_to_str<'a>(s: *const c_char) -> Option<&'a str> {
    CStr::from_ptr(s).to_str().ok()
}

/// 创建客户端句柄
///
/// `use_tls` 非 0 时使用 https。失败时返回空指针。
#[no_mangle]
pub extern "C" fn shinobi_client_new(server: *const c_char, use_tls: c_int) -> *mut ShinobiHandle {
    if server.is_null() {
        return ptr::null_mut();
    }

    let server = match unsafe { cstr_to_str(server) } {
        Some(s) => s.to_string(),
        None => return ptr::null_mut(),
    };

    let runtime = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            warn!("Failed to create tokio runtime: {}", e);
            return ptr::null_mut();
        }
    };

    let config = ClientConfig {
        server,
        use_tls: use_tls != 0,
        ..ClientConfig::default()
    };

    Box::into_raw(Box::new(ShinobiHandle { runtime, config }))
}

/// 销毁客户端句柄
#[no_mangle]
pub extern "C" fn shinobi_client_free(handle: *mut ShinobiHandle) {
    if !handle.is_null() {
        unsafe {
            drop(Box::from_raw(handle));
        }
    }
}

/// 校验服务器地址，有效返回 1，无效返回 0
#[no_mangle]
pub extern "C" fn shinobi_validate_server(server: *const c_char) -> c_int {
    if server.is_null() {
        return 0;
    }
    match unsafe { cstr_to_str(server) } {
        Some(s) if validate::server_is_valid(s) => 1,
        _ => 0,
    }
}

/// 校验邮箱，有效返回 1，无效返回 0
#[no_mangle]
pub extern "C" fn shinobi_validate_email(email: *const c_char) -> c_int {
    if email.is_null() {
        return 0;
    }
    match unsafe { cstr_to_str(email) } {
        Some(s) if validate::email_is_valid(s) => 1,
        _ => 0,
    }
}

/// 校验密码，有效返回 1，无效返回 0
#[no_mangle]
pub extern "C" fn shinobi_validate_password(password: *const c_char) -> c_int {
    if password.is_null() {
        return 0;
    }
    match unsafe { cstr_to_str(password) } {
        Some(s) if validate::password_is_valid(s) => 1,
        _ => 0,
    }
}

/// 用户登录（阻塞调用）
///
/// 成功时 `out_auth_token` 与 `out_uid` 收到堆上分配的 C 字符串，
/// 由调用方用 [`shinobi_string_free`] 释放。
#[no_mangle]
pub extern "C" fn shinobi_login(
    handle: *mut ShinobiHandle,
    email: *const c_char,
    password: *const c_char,
    out_auth_token: *mut *mut c_char,
    out_uid: *mut *mut c_char,
) -> c_int {
    if handle.is_null()
        || email.is_null()
        || password.is_null()
        || out_auth_token.is_null()
        || out_uid.is_null()
    {
        return SHINOBI_ERR_NULL_PTR;
    }

    let handle = unsafe { &*handle };
    let email = match unsafe { cstr_to_str(email) } {
        Some(s) => s,
        None => return SHINOBI_ERR_ENCODING,
    };
    let password = match unsafe { cstr_to_str(password) } {
        Some(s) => s,
        None => return SHINOBI_ERR_ENCODING,
    };

    // 与表单一致的本地校验，失败时不发送请求
    if !validate::server_is_valid(&handle.config.server) {
        return SHINOBI_ERR_INVALID_SERVER;
    }
    if !validate::email_is_valid(email) {
        return SHINOBI_ERR_INVALID_EMAIL;
    }
    if !validate::password_is_valid(password) {
        return SHINOBI_ERR_INVALID_PASSWORD;
    }

    let client = match ShinobiClient::new(handle.config.clone()) {
        Ok(c) => c,
        Err(e) => return error_code(&e),
    };

    let user = match handle.runtime.block_on(client.login(email, password)) {
        Ok(user) => user,
        Err(e) => return error_code(&e),
    };

    let auth_token = match CString::new(user.auth_token) {
        Ok(s) => s,
        Err(_) => return SHINOBI_ERR_ENCODING,
    };
    let uid = match CString::new(user.uid) {
        Ok(s) => s,
        Err(_) => return SHINOBI_ERR_ENCODING,
    };

    unsafe {
        *out_auth_token = auth_token.into_raw();
        *out_uid = uid.into_raw();
    }
    SHINOBI_OK
}

/// 释放由本库分配的 C 字符串
#[no_mangle]
pub extern "C" fn shinobi_string_free(s: *mut c_char) {
    if !s.is_null() {
        unsafe {
            drop(CString::from_raw(s));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ffi() {
        let empty = CString::new("").unwrap();
        let host = CString::new("host").unwrap();
        let email = CString::new("a@b").unwrap();
        let bad_email = CString::new("a").unwrap();

        assert_eq!(shinobi_validate_server(empty.as_ptr()), 0);
        assert_eq!(shinobi_validate_server(host.as_ptr()), 1);
        assert_eq!(shinobi_validate_email(bad_email.as_ptr()), 0);
        assert_eq!(shinobi_validate_email(email.as_ptr()), 1);
        assert_eq!(shinobi_validate_password(empty.as_ptr()), 0);
        assert_eq!(shinobi_validate_password(host.as_ptr()), 1);
    }

    #[test]
    fn test_validate_null_is_invalid() {
        assert_eq!(shinobi_validate_server(ptr::null()), 0);
        assert_eq!(shinobi_validate_email(ptr::null()), 0);
        assert_eq!(shinobi_validate_password(ptr::null()), 0);
    }

    #[test]
    fn test_handle_lifecycle() {
        let server = CString::new("example.com").unwrap();
        let handle = shinobi_client_new(server.as_ptr(), 1);
        assert!(!handle.is_null());
        shinobi_client_free(handle);
    }

    #[test]
    fn test_client_new_null_server() {
        assert!(shinobi_client_new(ptr::null(), 0).is_null());
    }

    #[test]
    fn test_login_null_ptr() {
        let email = CString::new("a@b").unwrap();
        let pass = CString::new("secret").unwrap();
        let mut token: *mut c_char = ptr::null_mut();
        let mut uid: *mut c_char = ptr::null_mut();

        let result = shinobi_login(
            ptr::null_mut(),
            email.as_ptr(),
            pass.as_ptr(),
            &mut token,
            &mut uid,
        );
        assert_eq!(result, SHINOBI_ERR_NULL_PTR);
    }

    #[test]
    fn test_login_invalid_email_not_sent() {
        let server = CString::new("example.com").unwrap();
        let handle = shinobi_client_new(server.as_ptr(), 0);
        let email = CString::new("no-at-sign").unwrap();
        let pass = CString::new("secret").unwrap();
        let mut token: *mut c_char = ptr::null_mut();
        let mut uid: *mut c_char = ptr::null_mut();

        let result = shinobi_login(handle, email.as_ptr(), pass.as_ptr(), &mut token, &mut uid);
        assert_eq!(result, SHINOBI_ERR_INVALID_EMAIL);

        shinobi_client_free(handle);
    }
}
