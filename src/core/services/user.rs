use hex::ToHex;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::core::models::user::{Insert as UserInsert, User};
use crate::core::ports::repository::{Store, UserCommon};
use crate::error::Error;

pub fn hash_password(pass: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(pass);
    hasher.update(salt);
    hasher.finalize().encode_hex()
}

fn random_salt() -> String {
    let chars = vec![
        '1', '2', '3', '4', '5', '6', '7', '8', '9', '0', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
        'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
    ];
    let mut salt = String::new();
    let mut rng = rand::thread_rng();
    for _ in 0..32 {
        let i = rng.gen_range(0..chars.len());
        salt.push(chars[i]);
    }
    salt
}

pub async fn signup<S>(store: &mut S, name: String, business_name: String, email: String, password: String) -> Result<i32, Error>
where
    S: Store,
{
    if name.trim().len() < 2 {
        return Err(Error::Validation("name must be at least 2 characters".into()));
    }
    if business_name.trim().len() < 2 {
        return Err(Error::Validation("business name must be at least 2 characters".into()));
    }
    if !email.contains('@') {
        return Err(Error::Validation("invalid email format".into()));
    }
    if password.len() < 6 {
        return Err(Error::Validation("password must be at least 6 characters".into()));
    }
    if UserCommon::get_by_email(store, &email).await?.is_some() {
        return Err(Error::Validation("email already registered".into()));
    }
    let salt = random_salt();
    UserCommon::insert(
        store,
        UserInsert {
            name: name.trim().to_owned(),
            business_name: business_name.trim().to_owned(),
            email: email.trim().to_lowercase(),
            password: hash_password(&password, &salt),
            salt,
        },
    )
    .await
}

// An unknown email and a wrong password fail identically.
pub async fn verify_login<S>(store: &mut S, email: &str, password: &str) -> Result<User, Error>
where
    S: Store,
{
    let user = UserCommon::get_by_email(store, email).await?.ok_or(Error::Unauthorized)?;
    if hash_password(password, &user.salt) != user.password {
        return Err(Error::Unauthorized);
    }
    Ok(user)
}

pub async fn current_user<S>(store: &mut S, uid: i32) -> Result<User, Error>
where
    S: Store,
{
    UserCommon::get(store, uid).await?.ok_or(Error::NotFound("user"))
}
