use crate::api::ApiError;

/// Pre-flight check for the key gate; the key itself is only validated by the
/// server when the first admin request goes out.
pub fn validate_admin_key(key: &str) -> Result<String, ApiError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(ApiError::validation("관리자 API 키를 입력해주세요."));
    }
    Ok(key.to_string())
}

pub fn validate_new_user(name: &str, student_id: &str) -> Result<(), ApiError> {
    if name.trim().is_empty() || student_id.trim().is_empty() {
        return Err(ApiError::validation("이름과 학번을 모두 입력해주세요."));
    }
    Ok(())
}

/// 401/403 from an admin endpoint means the stored key is no longer valid
/// and the gate has to re-lock.
pub fn is_key_rejection(error: &ApiError) -> bool {
    matches!(error.status(), Some(401) | Some(403))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiErrorKind;

    #[test]
    fn admin_key_is_trimmed_and_must_not_be_empty() {
        assert_eq!(validate_admin_key("  secret  ").unwrap(), "secret");

        let err = validate_admin_key("   ").unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Validation);
        assert_eq!(err.message, "관리자 API 키를 입력해주세요.");
    }

    #[test]
    fn new_user_needs_both_name_and_student_id() {
        assert!(validate_new_user("김철수", "20240001").is_ok());
        assert!(validate_new_user("", "20240001").is_err());
        assert!(validate_new_user("김철수", "  ").is_err());
    }

    #[test]
    fn only_auth_statuses_count_as_key_rejections() {
        assert!(is_key_rejection(&ApiError::backend(401, "bad key")));
        assert!(is_key_rejection(&ApiError::backend(403, "forbidden")));
        assert!(!is_key_rejection(&ApiError::backend(500, "boom")));
        assert!(!is_key_rejection(&ApiError::network()));
        assert!(!is_key_rejection(&ApiError::validation("empty")));
    }
}
