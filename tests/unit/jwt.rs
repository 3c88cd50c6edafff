use hr_portal::config::AuthConfig;
use hr_portal::db::enums::UserRole;
use hr_portal::db::models::AuthUser;
use hr_portal::middleware::JwtService;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

fn jwt() -> JwtService {
    JwtService::new(&AuthConfig {
        jwt_secret: "integration-secret".to_string(),
        access_token_expires_in: 600,
    })
}

#[test]
fn test_issued_token_carries_identity() {
    let user = AuthUser {
        id: Uuid::new_v4(),
        email: "admin@example.com".to_string(),
        name: "Admin".to_string(),
        role: UserRole::Admin,
    };
    let service = jwt();
    let token = service.generate_access_token(&user).unwrap();
    let claims = service.verify_token(&token).unwrap();

    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.email, "admin@example.com");
    assert_eq!(claims.role, UserRole::Admin);
    assert_eq!(service.expires_in(), 600);
}

#[test]
fn test_expired_token_is_rejected() {
    #[derive(serde::Serialize)]
    struct Expired {
        sub: Uuid,
        email: String,
        name: String,
        role: UserRole,
        exp: u64,
        iat: u64,
        jti: String,
    }

    let claims = Expired {
        sub: Uuid::new_v4(),
        email: "old@example.com".to_string(),
        name: "Old".to_string(),
        role: UserRole::User,
        exp: 1_000,
        iat: 900,
        jti: Uuid::new_v4().to_string(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"integration-secret"),
    )
    .unwrap();

    assert!(jwt().verify_token(&token).is_err());
}

#[test]
fn test_garbage_token_is_rejected() {
    assert!(jwt().verify_token("not-a-jwt").is_err());
}
