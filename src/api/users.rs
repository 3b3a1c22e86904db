use serde::Deserialize;

use super::param;
use crate::client::MoodleClient;
use crate::error::Error;
use crate::mail::{self, WelcomeEmail};
use crate::password::random_password;
use crate::types::{CustomField, Person};

#[derive(Debug, Deserialize)]
struct UserRecord {
    id: i64,
    #[serde(default)]
    firstname: String,
    #[serde(default)]
    lastname: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    profileimageurl: String,
    #[serde(default)]
    customfields: Vec<CustomField>,
}

impl UserRecord {
    fn into_person(self) -> Person {
        let personal_email = self
            .customfields
            .iter()
            .find(|f| f.name == "personalemail")
            .map(|f| f.value.clone())
            .unwrap_or_default();
        Person {
            id: self.id,
            username: self.username,
            email: self.email,
            personal_email,
            first_name: self.firstname,
            last_name: self.lastname,
            profile_image_url: self.profileimageurl,
            custom_fields: self.customfields,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserSearchResults {
    #[serde(default)]
    users: Vec<UserRecord>,
}

impl MoodleClient {
    async fn get_person_by_field(
        &self,
        field: &str,
        value: &str,
        what: &'static str,
    ) -> Result<Option<Person>, Error> {
        let records: Vec<UserRecord> = self
            .call_json(
                "core_user_get_users_by_field",
                &[param("field", field), param("values[0]", value)],
            )
            .await?;

        let mut people: Vec<Person> = records.into_iter().map(UserRecord::into_person).collect();
        match people.len() {
            0 => Ok(None),
            1 => Ok(Some(people.remove(0))),
            _ => Err(Error::AmbiguousMatch(what)),
        }
    }

    /// Get the account matching a username. `None` if not found.
    ///
    /// # Errors
    ///
    /// Fails if several accounts share the username.
    pub async fn get_person_by_username(&self, username: &str) -> Result<Option<Person>, Error> {
        self.get_person_by_field("username", username, "username")
            .await
    }

    /// Get the account with the given Moodle id. `None` if not found.
    pub async fn get_person_by_id(&self, id: i64) -> Result<Option<Person>, Error> {
        self.get_person_by_field("id", &id.to_string(), "id").await
    }

    /// Get the account matching an email address. `None` if not found.
    ///
    /// # Errors
    ///
    /// Fails if several accounts share the address.
    pub async fn get_person_by_email(&self, email: &str) -> Result<Option<Person>, Error> {
        self.get_person_by_field("email", email, "email address")
            .await
    }

    /// Search accounts by a single criterion, e.g.
    /// `get_people_by_attribute("email", "%@example.com")`.
    pub async fn get_people_by_attribute(
        &self,
        attribute: &str,
        value: &str,
    ) -> Result<Vec<Person>, Error> {
        let results: UserSearchResults = self
            .call_json(
                "core_user_get_users",
                &[
                    param("criteria[0][key]", attribute),
                    param("criteria[0][value]", value),
                ],
            )
            .await?;
        Ok(results
            .users
            .into_iter()
            .map(UserRecord::into_person)
            .collect())
    }

    /// Search accounts by first and last name. The server matches loosely;
    /// results are filtered to case-insensitive equality on both names.
    pub async fn get_people_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<Person>, Error> {
        let results: UserSearchResults = self
            .call_json(
                "core_user_get_users",
                &[
                    param("criteria[0][key]", "firstname"),
                    param("criteria[0][value]", first_name),
                    param("criteria[1][key]", "lastname"),
                    param("criteria[1][value]", last_name),
                ],
            )
            .await?;
        Ok(results
            .users
            .into_iter()
            .filter(|u| {
                u.firstname.eq_ignore_ascii_case(first_name)
                    && u.lastname.eq_ignore_ascii_case(last_name)
            })
            .map(UserRecord::into_person)
            .collect())
    }

    /// Create an account, returning the new Moodle id. With no password the
    /// server generates one and emails it to the user.
    pub async fn add_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        username: &str,
        password: Option<&str>,
    ) -> Result<i64, Error> {
        if !email.contains('@') {
            return Err(Error::InvalidEmail(email.to_owned()));
        }

        let mut params = vec![
            param("users[0][firstname]", first_name),
            param("users[0][lastname]", last_name),
            param("users[0][email]", email),
            param("users[0][username]", username),
        ];
        match password {
            Some(password) => params.push(param("users[0][password]", password)),
            None => params.push(param("users[0][createpassword]", 1)),
        }

        #[derive(Debug, Deserialize)]
        struct Created {
            id: i64,
        }

        let body = self.call("core_user_create_users", &params).await?;
        let created: Vec<Created> = serde_json::from_str(&body)?;
        match created.as_slice() {
            [one] => Ok(one.id),
            _ => Err(Error::UnexpectedResponse(body)),
        }
    }

    /// Update the named account fields. Empty fields are left untouched.
    pub async fn update_user(
        &self,
        id: i64,
        first_name: &str,
        last_name: &str,
        email: &str,
        username: &str,
        password: Option<&str>,
    ) -> Result<(), Error> {
        let mut params = vec![param("users[0][id]", id)];
        for (key, value) in [
            ("users[0][firstname]", first_name),
            ("users[0][lastname]", last_name),
            ("users[0][email]", email),
            ("users[0][username]", username),
        ] {
            if !value.is_empty() {
                params.push(param(key, value));
            }
        }
        if let Some(password) = password {
            params.push(param("users[0][password]", password));
        }

        let body = self.call("core_user_update_users", &params).await?;
        if body.is_empty() || body == "null" {
            Ok(())
        } else {
            Err(Error::UnexpectedResponse(body))
        }
    }

    /// Set a single account attribute, e.g. `("suspended", "1")`.
    pub async fn set_user_attribute(
        &self,
        user_id: i64,
        attribute: &str,
        value: &str,
    ) -> Result<(), Error> {
        self.call_expect_empty(
            "core_user_update_users",
            &[
                param("users[0][id]", user_id),
                param(format!("users[0][{attribute}]"), value),
            ],
        )
        .await
    }

    /// Set a profile custom field by short name.
    pub async fn set_user_custom_field(
        &self,
        user_id: i64,
        field: &str,
        value: &str,
    ) -> Result<(), Error> {
        self.call_expect_empty(
            "core_user_update_users",
            &[
                param("users[0][id]", user_id),
                param("users[0][customfields][0][type]", field),
                param("users[0][customfields][0][value]", value),
            ],
        )
        .await
    }

    /// Set an account password. The password must satisfy the server's
    /// password policy.
    pub async fn reset_password(&self, user_id: i64, password: &str) -> Result<(), Error> {
        self.call_expect_null(
            "core_user_update_users",
            &[
                param("users[0][id]", user_id),
                param("users[0][password]", password),
            ],
        )
        .await
    }

    /// Reset the password of the account matching `email` to a fresh random
    /// one and email it to the user. Requires SMTP settings on the client.
    pub async fn reset_password_with_email(
        &self,
        email: &str,
        template: &WelcomeEmail,
    ) -> Result<(), Error> {
        let person = self
            .get_person_by_email(email)
            .await?
            .ok_or(Error::UnknownEmail)?;

        let password = random_password();
        self.reset_password(person.id, &password).await?;

        let settings = self
            .smtp_settings()
            .ok_or(Error::SmtpSettings("host and port"))?;
        mail::send_welcome(settings, template, &person, self.base_url(), &password).await
    }

    /// Upload an image and make it the account's profile picture.
    pub async fn set_profile_picture(&self, user_id: i64, image: Vec<u8>) -> Result<(), Error> {
        use url::form_urlencoded;

        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("token", self.token())
            .append_pair("filearea", "draft")
            .append_pair("itemid", "0")
            .append_pair("filepath", "/")
            .append_pair("filename", "profile.jpg")
            .finish();
        let upload_url = format!("{}webservice/upload.php?{}", self.base_url(), query);

        let body = self.fetcher().post(&upload_url, image).await?;
        Self::check_exception(&body)?;

        #[derive(Debug, Deserialize)]
        struct Uploaded {
            itemid: i64,
        }

        let uploaded: Vec<Uploaded> = serde_json::from_str(&body)?;
        let draft_item = uploaded
            .first()
            .ok_or_else(|| Error::UnexpectedResponse(body.clone()))?;

        #[derive(Debug, Deserialize)]
        struct PictureResult {
            #[serde(default)]
            success: bool,
        }

        let result: PictureResult = self
            .call_json(
                "core_user_update_picture",
                &[
                    param("draftitemid", draft_item.itemid),
                    param("userid", user_id),
                ],
            )
            .await?;
        if result.success {
            Ok(())
        } else {
            Err(Error::UnexpectedResponse(
                "picture update rejected".to_owned(),
            ))
        }
    }
}
