//! Command execution.

use std::process::ExitCode;
use std::sync::Arc;

use tamis_application::{
    CheckHealth, FetchProfile, Logout, ProfileOutcome, RefreshOutcome, RefreshSession, Session,
};
use tamis_domain::{
    CallbackQuery, CallbackState, ClientSettings, FormState, GoogleLinkState, LoginForm,
    RegisterForm, messages,
};
use tamis_infrastructure::{CallbackServer, FileSessionStore, ReqwestAuthApi, SystemNavigator};
use tamis_ui::{LoginPage, OAuthCallbackPage, RegisterPage};

use crate::cli::Command;

type CommandResult = Result<ExitCode, Box<dyn std::error::Error>>;

/// Everything a command needs, built once from configuration.
pub struct Context {
    pub settings: ClientSettings,
    pub api: Arc<ReqwestAuthApi>,
    pub session: Session<FileSessionStore>,
    pub navigator: Arc<SystemNavigator>,
}

impl Context {
    fn login_page(&self) -> LoginPage<ReqwestAuthApi, FileSessionStore, SystemNavigator> {
        LoginPage::new(
            Arc::clone(&self.api),
            self.session.clone(),
            Arc::clone(&self.navigator),
        )
    }

    fn callback_page(
        &self,
    ) -> OAuthCallbackPage<ReqwestAuthApi, FileSessionStore, SystemNavigator> {
        OAuthCallbackPage::new(
            Arc::clone(&self.api),
            self.session.clone(),
            Arc::clone(&self.navigator),
            self.settings.redirect_delay(),
        )
    }
}

fn exit_code(ok: bool) -> ExitCode {
    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn print_status(status: &str) {
    if !status.is_empty() {
        println!("{status}");
    }
}

/// Runs `command` against `ctx`.
///
/// # Errors
///
/// Returns an error only for failures outside the pages' own status
/// reporting, such as the callback listener failing to bind.
pub async fn run(command: Command, ctx: &Context) -> CommandResult {
    match command {
        Command::Register {
            email,
            username,
            password,
        } => {
            let page = RegisterPage::new(Arc::clone(&ctx.api));
            let state = page
                .submit(RegisterForm::new(email, username, password))
                .await;
            print_status(&page.status());
            Ok(exit_code(state == Some(FormState::Succeeded)))
        }

        Command::Login { email, password } => {
            let page = ctx.login_page();
            let state = page.submit(LoginForm::new(email, password)).await;
            print_status(&page.status());
            if state == Some(FormState::Succeeded) {
                println!("{}", ctx.session.status().await?.display_message());
            }
            Ok(exit_code(state == Some(FormState::Succeeded)))
        }

        Command::LinkGoogle { wait } => link_google(ctx, wait).await,

        Command::Callback { redirect } => {
            let query = CallbackQuery::parse(&redirect)?;
            let page = ctx.callback_page();
            let state = page.mount(query).await;
            print_status(&page.status());
            page.redirect_finished().await;
            Ok(exit_code(matches!(
                state,
                Some(CallbackState::Linked | CallbackState::Redirected)
            )))
        }

        Command::Refresh => {
            let outcome = RefreshSession::new(Arc::clone(&ctx.api), ctx.session.clone())
                .execute()
                .await;
            match outcome {
                Ok(outcome) => {
                    print_status(outcome.message());
                    Ok(exit_code(matches!(outcome, RefreshOutcome::Refreshed { .. })))
                }
                Err(e) => fail(&e.user_message()),
            }
        }

        Command::Logout => match Logout::new(ctx.session.clone()).execute().await {
            Ok(true) => {
                println!("{}", messages::LOGGED_OUT);
                Ok(ExitCode::SUCCESS)
            }
            Ok(false) => {
                println!("{}", messages::NO_SESSION);
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => fail(&e.user_message()),
        },

        Command::Whoami => whoami(ctx).await,

        Command::Health => match CheckHealth::new(Arc::clone(&ctx.api)).execute().await {
            Ok(outcome) => {
                print_status(&outcome.message);
                println!("{}", outcome.summary());
                Ok(exit_code(outcome.healthy))
            }
            Err(e) => fail(&e.user_message()),
        },
    }
}

fn fail(message: &str) -> CommandResult {
    eprintln!("{message}");
    Ok(ExitCode::FAILURE)
}

async fn link_google(ctx: &Context, wait: bool) -> CommandResult {
    // Bind first so the provider cannot redirect before anyone listens.
    let listener = if wait {
        Some(CallbackServer::from_settings(&ctx.settings).bind().await?)
    } else {
        None
    };

    let page = ctx.login_page();
    let state = page.link_google().await;
    print_status(&page.status());

    let Some(GoogleLinkState::Redirecting { auth_url }) = state else {
        return Ok(ExitCode::FAILURE);
    };

    let Some(listener) = listener else {
        println!("{auth_url}");
        println!(
            "Après l'autorisation, terminez avec : tamis callback \"<URL de redirection>\""
        );
        return Ok(ExitCode::SUCCESS);
    };

    let callback = Arc::new(ctx.callback_page());
    listener.serve(callback.clone()).await?;
    print_status(&callback.status());
    callback.redirect_finished().await;
    Ok(exit_code(matches!(
        callback.state(),
        CallbackState::Linked | CallbackState::Redirected
    )))
}

async fn whoami(ctx: &Context) -> CommandResult {
    let outcome = FetchProfile::new(Arc::clone(&ctx.api), ctx.session.clone())
        .execute()
        .await;
    match outcome {
        Ok(ProfileOutcome::Found { user }) => {
            println!("{} <{}> (id {})", user.username, user.email, user.id);
            println!("{}", ctx.session.status().await?.display_message());
            Ok(ExitCode::SUCCESS)
        }
        Ok(ProfileOutcome::NotSignedIn) => fail(messages::LOGIN_REQUIRED),
        Ok(ProfileOutcome::Rejected { message }) => fail(&message),
        Err(e) => fail(&e.user_message()),
    }
}
