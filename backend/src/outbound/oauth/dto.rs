//! DTOs for Google's token and userinfo responses.

use serde::Deserialize;

use crate::domain::ports::OAuthIdentity;

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponseDto {
    pub(super) access_token: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserInfoDto {
    #[serde(default)]
    pub(super) sub: String,
    #[serde(default)]
    pub(super) email: String,
    pub(super) email_verified: Option<bool>,
    #[serde(default)]
    pub(super) name: String,
    pub(super) picture: Option<String>,
}

impl UserInfoDto {
    /// Map a userinfo payload onto an identity, refusing profiles without a
    /// subject or a verified email.
    pub(super) fn into_identity(self, provider: &str) -> Result<OAuthIdentity, String> {
        let account_id = self.sub.trim().to_owned();
        if account_id.is_empty() {
            return Err("profile has no subject".to_owned());
        }
        let email = self.email.trim().to_owned();
        if email.is_empty() {
            return Err("profile has no email".to_owned());
        }
        if self.email_verified == Some(false) {
            return Err("profile email is not verified".to_owned());
        }
        Ok(OAuthIdentity {
            provider: provider.to_owned(),
            account_id,
            email,
            name: self.name.trim().to_owned(),
            image: self.picture.filter(|url| !url.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Profile mapping coverage.
    use super::*;
    use rstest::rstest;

    fn userinfo(json: &str) -> UserInfoDto {
        serde_json::from_str(json).expect("valid userinfo json")
    }

    #[rstest]
    fn verified_profile_maps_to_identity() {
        let identity = userinfo(
            r#"{"sub":"1098","email":"grace@example.com","email_verified":true,
                "name":" Grace Hopper ","picture":"https://example.com/g.png"}"#,
        )
        .into_identity("google")
        .expect("usable profile");

        assert_eq!(identity.account_id, "1098");
        assert_eq!(identity.name, "Grace Hopper");
        assert_eq!(identity.image.as_deref(), Some("https://example.com/g.png"));
    }

    #[rstest]
    #[case::no_subject(r#"{"email":"grace@example.com"}"#, "subject")]
    #[case::no_email(r#"{"sub":"1098"}"#, "no email")]
    #[case::unverified(
        r#"{"sub":"1098","email":"grace@example.com","email_verified":false}"#,
        "not verified"
    )]
    fn unusable_profiles_are_refused(#[case] json: &str, #[case] reason: &str) {
        let err = userinfo(json).into_identity("google").expect_err("refused");
        assert!(err.contains(reason), "{err}");
    }

    #[rstest]
    fn missing_name_and_picture_are_tolerated() {
        let identity = userinfo(r#"{"sub":"7","email":"x@example.com","picture":""}"#)
            .into_identity("google")
            .expect("usable profile");
        assert!(identity.name.is_empty());
        assert!(identity.image.is_none());
    }
}
