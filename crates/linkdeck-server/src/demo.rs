// SPDX-License-Identifier: Apache-2.0

//! Optional demo accounts for local development, built through the editor
//! operations so the seeded documents satisfy every collection invariant.

use chrono::Utc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

use linkdeck_editor::{add_link, LinkDraft};
use linkdeck_model::{ColorScheme, Configuration, IconType, User, Username};
use linkdeck_store::{ProfileStore, StoreError, UserRecord};

use crate::auth::{hash_password, mint_salt, user_id_for};

pub const DEMO_PASSWORD: &str = "linkdeck-demo";

struct DemoAccount {
    username: &'static str,
    name: &'static str,
    email: &'static str,
    bio: &'static str,
    avatar: &'static str,
    background_color: &'static str,
    color_scheme: ColorScheme,
    special_title: &'static str,
    special_emoji: &'static str,
    links: &'static [(&'static str, &'static str, &'static str)],
}

const DEMO_ACCOUNTS: &[DemoAccount] = &[
    DemoAccount {
        username: "nitesh",
        name: "Nitesh Kumar",
        email: "nitesh@example.com",
        bio: "Full Stack Developer | React Expert | Open Source Contributor",
        avatar: "\u{1F680}",
        background_color: "#1a1a1a",
        color_scheme: ColorScheme::Dark,
        special_title: "Hire Me",
        special_emoji: "\u{1F4BC}",
        links: &[
            ("GitHub", "https://github.com/nitesh", "Github"),
            ("LinkedIn", "https://linkedin.com/in/nitesh", "Linkedin"),
            ("Portfolio", "https://nitesh.dev", "Globe"),
        ],
    },
    DemoAccount {
        username: "akshay",
        name: "Akshay More",
        email: "akshay@example.com",
        bio: "Helping Brands Grow with Code, Creativity & Automation.",
        avatar: "\u{1F451}",
        background_color: "#ffffff",
        color_scheme: ColorScheme::Royal,
        special_title: "Work With Me",
        special_emoji: "\u{2728}",
        links: &[
            ("GitHub", "https://github.com/akshay", "Github"),
            ("Instagram", "https://instagram.com/akshay", "Instagram"),
            ("LinkedIn", "https://linkedin.com/in/akshay", "Linkedin"),
        ],
    },
];

fn build_configuration(account: &DemoAccount, username: &Username) -> Configuration {
    let mut config = Configuration::default_for(username.clone(), account.name);
    config.profile.bio = account.bio.to_string();
    config.profile.avatar = account.avatar.to_string();
    config.theme.background_color = account.background_color.to_string();
    config.theme.color_scheme = account.color_scheme;
    config.special_button.enabled = true;
    config.special_button.title = account.special_title.to_string();
    config.special_button.url = "https://wa.me/1234567890".to_string();
    config.special_button.emoji = account.special_emoji.to_string();
    for (name, url, icon) in account.links {
        config = add_link(
            &config,
            LinkDraft::new(*name, *url).with_icon(*icon, IconType::Lucide),
        )
        .expect("demo link drafts are non-empty");
    }
    config
}

/// Idempotent: accounts whose configuration already exists are skipped.
pub async fn seed_demo_data(
    store: &dyn ProfileStore,
    password_iterations: u32,
) -> Result<(), StoreError> {
    for account in DEMO_ACCOUNTS {
        let username = Username::parse(account.username).expect("demo username");
        if store.config_exists(&username).await? {
            continue;
        }
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let salt = mint_salt(account.username, nanos, 0);
        let record = UserRecord {
            user: User {
                id: user_id_for(account.username, nanos),
                username: username.clone(),
                email: account.email.to_string(),
                name: account.name.to_string(),
                created_at: Utc::now(),
            },
            password_hash: hash_password(&salt, DEMO_PASSWORD, password_iterations),
            password_salt: salt,
        };
        store.put_user(&record).await?;
        store
            .put_config(&username, &build_configuration(account, &username))
            .await?;
        info!(username = %username, "demo account seeded");
    }
    Ok(())
}
