use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    IntoActiveModel, QueryFilter, Set,
};

use crate::{
    dto::{
        auth::{Claims, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserRole},
        users::{ChangePasswordRequest, UpdateProfileRequest},
    },
    entity::{
        Users,
        users::{ActiveModel as UserActive, Column as UserCol, Model as UserModel},
    },
    error::{AppError, AppResult},
    models::{DEFAULT_PROFILE_PICTURE, UserProfile},
    security::{TokenKeys, hash_password, verify_password},
};

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub async fn register_user<C: ConnectionTrait>(
    db: &C,
    payload: RegisterRequest,
) -> AppResult<RegisterResponse> {
    let fields = (
        required(payload.first_name),
        required(payload.last_name),
        required(payload.username),
        required(payload.email),
        required(payload.contact_number),
        payload.password.filter(|p| !p.is_empty()),
    );
    let (Some(firstname), Some(lastname), Some(username), Some(email), Some(contactnumber), Some(password)) =
        fields
    else {
        return Err(AppError::bad_request("All fields are required!"));
    };

    let role = match required(payload.user_type) {
        Some(raw) => raw
            .parse::<UserRole>()
            .map_err(|_| AppError::bad_request("Invalid user type"))?,
        None => UserRole::Client,
    };

    let email_taken = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(db)
        .await?
        .is_some();
    if email_taken {
        return Err(AppError::Conflict("Email already exists!".into()));
    }

    let username_taken = Users::find()
        .filter(UserCol::Username.eq(username.as_str()))
        .one(db)
        .await?
        .is_some();
    if username_taken {
        return Err(AppError::Conflict("Username already exists!".into()));
    }

    let user = UserActive {
        userid: NotSet,
        firstname: Set(firstname),
        lastname: Set(lastname),
        username: Set(username),
        email: Set(email),
        contactnumber: Set(contactnumber),
        password: Set(hash_password(&password)?),
        user_type: Set(role.as_str().to_string()),
        address: Set(required(payload.address)),
        user_img: Set(None),
        created_at: NotSet,
    }
    .insert(db)
    .await?;

    tracing::info!(userid = user.userid, role = %role, "user registered");
    Ok(RegisterResponse {
        userid: user.userid,
    })
}

pub async fn login_user<C: ConnectionTrait>(
    db: &C,
    tokens: &TokenKeys,
    payload: LoginRequest,
) -> AppResult<LoginResponse> {
    let (Some(identifier), Some(password)) = (
        required(payload.identifier),
        payload.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::bad_request(
            "Username/Email and password are required!",
        ));
    };

    let user = Users::find()
        .filter(
            Condition::any()
                .add(UserCol::Email.eq(identifier.as_str()))
                .add(UserCol::Username.eq(identifier.as_str())),
        )
        .one(db)
        .await?;

    let invalid = || AppError::Unauthorized("Invalid username/email or password.".into());
    let user = user.ok_or_else(invalid)?;
    if !verify_password(&password, &user.password)? {
        return Err(invalid());
    }

    let role = user.user_type.parse::<UserRole>().unwrap_or(UserRole::Client);
    let claims = Claims {
        sub: user.userid.to_string(),
        email: user.email.clone(),
        user_type: role.as_str().to_string(),
        iat: Utc::now().timestamp().max(0) as usize,
    };
    let access_token = tokens.issue(&claims)?;

    tracing::info!(userid = user.userid, "user logged in");
    Ok(LoginResponse {
        message: "Login successful!".into(),
        access_token,
        user_type: role.as_str().to_string(),
    })
}

async fn find_user<C: ConnectionTrait>(db: &C, userid: i32) -> AppResult<UserModel> {
    Users::find_by_id(userid)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))
}

pub async fn get_profile<C: ConnectionTrait>(db: &C, userid: i32) -> AppResult<UserProfile> {
    find_user(db, userid).await.map(profile_from_entity)
}

pub async fn update_profile<C: ConnectionTrait>(
    db: &C,
    userid: i32,
    payload: UpdateProfileRequest,
) -> AppResult<UserProfile> {
    let mut user = find_user(db, userid).await?.into_active_model();

    if let Some(firstname) = required(payload.firstname) {
        user.firstname = Set(firstname);
    }
    if let Some(lastname) = required(payload.lastname) {
        user.lastname = Set(lastname);
    }
    if let Some(username) = required(payload.username) {
        user.username = Set(username);
    }
    if let Some(contactnumber) = required(payload.contactnumber) {
        user.contactnumber = Set(contactnumber);
    }
    if let Some(address) = payload.address {
        user.address = Set(Some(address.trim().to_string()).filter(|a| !a.is_empty()));
    }

    let updated = if user.is_changed() {
        user.update(db).await?
    } else {
        find_user(db, userid).await?
    };
    Ok(profile_from_entity(updated))
}

pub async fn change_password<C: ConnectionTrait>(
    db: &C,
    userid: i32,
    payload: ChangePasswordRequest,
) -> AppResult<()> {
    let (Some(current), Some(new)) = (
        payload.current_password.filter(|p| !p.is_empty()),
        payload.new_password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::bad_request(
            "Current password and new password are required",
        ));
    };

    let user = find_user(db, userid).await?;
    if !verify_password(&current, &user.password)? {
        return Err(AppError::bad_request("Current password is incorrect"));
    }

    let mut active = user.into_active_model();
    active.password = Set(hash_password(&new)?);
    active.update(db).await?;

    tracing::info!(userid, "password changed");
    Ok(())
}

pub fn profile_from_entity(model: UserModel) -> UserProfile {
    UserProfile {
        userid: model.userid,
        firstname: model.firstname,
        lastname: model.lastname,
        username: model.username,
        email: model.email,
        contactnumber: model.contactnumber,
        address: model.address,
        user_type: model.user_type.to_lowercase(),
        user_img: model
            .user_img
            .filter(|img| !img.is_empty())
            .unwrap_or_else(|| DEFAULT_PROFILE_PICTURE.to_string()),
    }
}
