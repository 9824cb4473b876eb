use std::time::Duration;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use crossterm::event::{self, Event, KeyEvent};

use crate::{
    client::{Client, Session},
    config::AppConfig,
    error::{AppError, Result},
    local_state::LocalState,
    routes::{Route, guard},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
    views::{
        budget::BudgetView, dashboard::DashboardView, login::LoginView, reports::ReportsView,
        transactions::TransactionsView,
    },
};

/// The mounted screen. Navigating replaces it, so every visit starts fresh.
#[derive(Debug)]
pub enum ActiveView {
    Login(LoginView),
    Dashboard(DashboardView),
    Transactions(TransactionsView),
    Budget(BudgetView),
    Reports(ReportsView),
}

impl ActiveView {
    pub fn route(&self) -> Route {
        match self {
            Self::Login(_) => Route::Login,
            Self::Dashboard(_) => Route::Dashboard,
            Self::Transactions(_) => Route::Transactions,
            Self::Budget(_) => Route::Budget,
            Self::Reports(_) => Route::Reports,
        }
    }

    /// True while a text field owns the keyboard.
    pub fn is_typing(&self) -> bool {
        match self {
            Self::Login(_) => true,
            Self::Dashboard(_) => false,
            Self::Transactions(view) => view.form.is_some() || view.filter_editor.is_some(),
            Self::Budget(view) => view.form.is_some() || view.month_input.is_some(),
            Self::Reports(view) => view.range_editor.is_some(),
        }
    }

    fn is_confirming(&self) -> bool {
        match self {
            Self::Transactions(view) => view.pending_delete.is_some(),
            Self::Budget(view) => view.pending_delete.is_some(),
            _ => false,
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub view: ActiveView,
    pub base_url: String,
    pub timezone: Tz,
}

pub struct App {
    config: AppConfig,
    client: Client,
    session: Session,
    local_state: LocalState,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let timezone = config.timezone()?;
        let client = Client::new(&config.base_url)?;
        let local_state = LocalState::load(&config.state_path)?;
        let session = local_state.session();
        let route = guard(Route::resolve(&config.start_route), &session);
        let view = mount(route, today(timezone), timezone);

        let state = AppState {
            view,
            base_url: config.base_url.clone(),
            timezone,
        };

        Ok(Self {
            config,
            client,
            session,
            local_state,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);
        self.refresh().await;

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn today(&self) -> NaiveDate {
        today(self.state.timezone)
    }

    /// Mounts `route` behind the login guard and loads its data.
    pub async fn navigate(&mut self, route: Route) {
        let route = guard(route, &self.session);
        tracing::info!(path = route.path(), "navigate");
        self.state.view = mount(route, self.today(), self.state.timezone);
        self.refresh().await;
    }

    /// Re-runs the mounted view's reads.
    pub async fn refresh(&mut self) {
        let client = &self.client;
        let session = &self.session;
        match &mut self.state.view {
            ActiveView::Login(_) => {}
            ActiveView::Dashboard(view) => view.fetch(client, session).await,
            ActiveView::Transactions(view) => view.fetch(client, session).await,
            ActiveView::Budget(view) => view.fetch(client, session).await,
            ActiveView::Reports(view) => view.fetch(client, session).await,
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let action = map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return Ok(());
        }

        if self.state.view.is_confirming() {
            let confirmed = matches!(action, AppAction::Input('y' | 'Y'));
            self.resolve_delete(confirmed).await;
            return Ok(());
        }

        if self.state.view.is_typing() {
            return self.handle_typing(action).await;
        }

        self.handle_command(action).await
    }

    async fn resolve_delete(&mut self, confirmed: bool) {
        let client = &self.client;
        let session = &self.session;
        match &mut self.state.view {
            ActiveView::Transactions(view) if confirmed => view.confirm_delete(client, session).await,
            ActiveView::Transactions(view) => view.cancel_delete(),
            ActiveView::Budget(view) if confirmed => view.confirm_delete(client, session).await,
            ActiveView::Budget(view) => view.cancel_delete(),
            _ => {}
        }
    }

    async fn handle_typing(&mut self, action: AppAction) -> Result<()> {
        if let ActiveView::Login(_) = self.state.view {
            return self.handle_login(action).await;
        }

        let client = &self.client;
        let session = &self.session;
        match &mut self.state.view {
            ActiveView::Transactions(view) => {
                if let Some(editor) = view.filter_editor.as_mut() {
                    match action {
                        AppAction::Cancel => view.cancel_filters(),
                        AppAction::Submit => view.apply_filters(client, session).await,
                        AppAction::NextField => editor.next_field(),
                        AppAction::Backspace => editor.backspace(),
                        AppAction::Input(ch) => editor.input(ch),
                        _ => {}
                    }
                } else if let Some(form) = view.form.as_mut() {
                    match action {
                        AppAction::Cancel => view.close_form(),
                        AppAction::Submit => view.submit(client, session).await,
                        AppAction::NextField => form.next_field(),
                        AppAction::Backspace => form.backspace(),
                        AppAction::Input(ch) => form.input(ch),
                        _ => {}
                    }
                }
            }
            ActiveView::Budget(view) => {
                if let Some(input) = view.month_input.as_mut() {
                    match action {
                        AppAction::Cancel => view.month_input = None,
                        AppAction::Submit => {
                            if view.apply_month_input() {
                                view.fetch(client, session).await;
                            }
                        }
                        AppAction::Backspace => {
                            input.pop();
                        }
                        AppAction::Input(ch) => input.push(ch),
                        _ => {}
                    }
                } else if let Some(form) = view.form.as_mut() {
                    match action {
                        AppAction::Cancel => view.close_form(),
                        AppAction::Submit => view.submit(client, session).await,
                        AppAction::NextField => form.next_field(),
                        AppAction::Backspace => form.backspace(),
                        AppAction::Input(ch) => form.input(ch),
                        _ => {}
                    }
                }
            }
            ActiveView::Reports(view) => {
                if let Some(editor) = view.range_editor.as_mut() {
                    match action {
                        AppAction::Cancel => view.cancel_range_editor(),
                        AppAction::Submit => {
                            if view.apply_range_editor() {
                                view.fetch(client, session).await;
                            }
                        }
                        AppAction::NextField => editor.next_field(),
                        AppAction::Backspace => editor.backspace(),
                        AppAction::Input(ch) => editor.input(ch),
                        _ => {}
                    }
                }
            }
            ActiveView::Login(_) | ActiveView::Dashboard(_) => {}
        }
        Ok(())
    }

    async fn handle_login(&mut self, action: AppAction) -> Result<()> {
        let ActiveView::Login(view) = &mut self.state.view else {
            return Ok(());
        };
        match action {
            AppAction::Cancel => self.should_quit = true,
            AppAction::NextField | AppAction::Up | AppAction::Down => view.advance_focus(),
            AppAction::Backspace => {
                view.active_field_mut().pop();
            }
            AppAction::Input(ch) => view.active_field_mut().push(ch),
            AppAction::Submit => {
                if view.submit(&self.client, &mut self.session).await {
                    tracing::info!("signed in");
                    self.local_state.remember(&self.session);
                    self.local_state.save(&self.config.state_path)?;
                    self.navigate(Route::Dashboard).await;
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn logout(&mut self) -> Result<()> {
        tracing::info!("signed out");
        self.session.sign_out();
        self.local_state.remember(&self.session);
        self.local_state.save(&self.config.state_path)?;
        self.navigate(Route::Login).await;
        Ok(())
    }

    async fn handle_command(&mut self, action: AppAction) -> Result<()> {
        let ch = match action {
            AppAction::Up => {
                self.move_selection(false);
                return Ok(());
            }
            AppAction::Down => {
                self.move_selection(true);
                return Ok(());
            }
            AppAction::Left | AppAction::Right => {
                if let ActiveView::Budget(view) = &mut self.state.view {
                    view.shift_month(action == AppAction::Right);
                    view.fetch(&self.client, &self.session).await;
                }
                return Ok(());
            }
            AppAction::Input(ch) => ch,
            _ => return Ok(()),
        };

        if let Some(route) = Route::from_shortcut(ch) {
            self.navigate(route).await;
            return Ok(());
        }

        match ch {
            'q' => self.should_quit = true,
            'L' => self.logout().await?,
            'r' => self.refresh().await,
            'j' => self.move_selection(true),
            'k' => self.move_selection(false),
            _ => self.handle_view_command(ch).await,
        }
        Ok(())
    }

    async fn handle_view_command(&mut self, ch: char) {
        let today = self.today();
        let client = &self.client;
        let session = &self.session;
        match &mut self.state.view {
            ActiveView::Transactions(view) => match ch {
                'a' => view.open_create(),
                'e' => view.open_edit(),
                'd' => view.request_delete(),
                'f' => view.open_filters(),
                _ => {}
            },
            ActiveView::Budget(view) => match ch {
                'a' => view.open_create(),
                'e' => view.open_edit(),
                'd' => view.request_delete(),
                'm' => view.open_month_input(),
                _ => {}
            },
            ActiveView::Reports(view) => match ch {
                'p' => {
                    view.cycle_period(today);
                    view.fetch(client, session).await;
                }
                'f' => view.open_range_editor(),
                _ => {}
            },
            ActiveView::Login(_) | ActiveView::Dashboard(_) => {}
        }
    }

    fn move_selection(&mut self, down: bool) {
        match &mut self.state.view {
            ActiveView::Transactions(view) if down => view.select_next(),
            ActiveView::Transactions(view) => view.select_prev(),
            ActiveView::Budget(view) if down => view.select_next(),
            ActiveView::Budget(view) => view.select_prev(),
            _ => {}
        }
    }
}

fn today(timezone: Tz) -> NaiveDate {
    Utc::now().with_timezone(&timezone).date_naive()
}

fn mount(route: Route, today: NaiveDate, timezone: Tz) -> ActiveView {
    match route {
        Route::Login => ActiveView::Login(LoginView::new()),
        Route::Dashboard => ActiveView::Dashboard(DashboardView::new()),
        Route::Transactions => ActiveView::Transactions(TransactionsView::new()),
        Route::Budget => ActiveView::Budget(BudgetView::new(today, timezone)),
        Route::Reports => ActiveView::Reports(ReportsView::new(today)),
    }
}
