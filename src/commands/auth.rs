// Copyright (c) 2025 Kasbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::auth;
use crate::store::KvStore;
use crate::utils::{confirm, prompt_line};

pub fn register(store: &dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").unwrap();
    let name = sub.get_one::<String>("name").unwrap();
    let password = match sub.get_one::<String>("password") {
        Some(p) => p.to_string(),
        None => prompt_line("Password: ")?,
    };
    let user = auth::register(store, email, name, &password)?;
    println!("Registered {} <{}> and logged in.", user.name, user.email);
    Ok(())
}

pub fn login(store: &dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").unwrap();
    let password = match sub.get_one::<String>("password") {
        Some(p) => p.to_string(),
        None => prompt_line("Password: ")?,
    };
    let user = auth::login(store, email, &password)?;
    println!("Logged in as {} <{}>.", user.name, user.email);
    Ok(())
}

pub fn logout(store: &dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    if auth::current_user(store)?.is_none() {
        println!("Not logged in.");
        return Ok(());
    }
    if !confirm("Log out of the current session?", sub.get_flag("yes"))? {
        println!("Aborted.");
        return Ok(());
    }
    auth::logout(store)?;
    println!("Logged out.");
    Ok(())
}

pub fn whoami(store: &dyn KvStore) -> Result<()> {
    match auth::current_user(store)? {
        Some(user) => println!("{} <{}> ({})", user.name, user.email, user.role.as_str()),
        None => println!("Not logged in."),
    }
    Ok(())
}
