use bcrypt::BcryptError;

pub fn hash(password: &str, cost: u32) -> Result<String, BcryptError> {
    bcrypt::hash(password, cost)
}

pub fn verify(password: &str, password_hash: &str) -> Result<bool, BcryptError> {
    bcrypt::verify(password, password_hash)
}
