//! Single binary web server: roster management and round pairing over a REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Log level via RUST_LOG (default "info").

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use swiss_tournament_web::{
    begin_round, clear_winner, finalize_round, roster_file_name, roster_from_csv, roster_to_csv,
    set_winner, team_points, Competitor, RoundOutcome, Side, Tournament, TournamentId,
    TournamentOptions,
};

/// A stored tournament and when a request last touched it.
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// All live tournaments, keyed by id.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Tournaments idle this long are evicted.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

/// How often the idle sweep runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Tournament plus derived display data.
#[derive(Serialize)]
struct TournamentView<'a> {
    #[serde(flatten)]
    tournament: &'a Tournament,
    standings: Vec<&'a Competitor>,
    eligible: usize,
    can_pair: bool,
}

impl<'a> TournamentView<'a> {
    fn new(tournament: &'a Tournament) -> Self {
        Self {
            tournament,
            standings: tournament.roster.standings(),
            eligible: tournament.roster.eligible_count(),
            can_pair: tournament.can_pair(),
        }
    }
}

#[derive(Serialize)]
struct FinalizeResponse<'a> {
    outcome: RoundOutcome,
    tournament: TournamentView<'a>,
}

#[derive(Serialize)]
struct TeamPointsResponse {
    formula: swiss_tournament_web::TeamPointsFormula,
    teams: BTreeMap<String, i64>,
}

#[derive(Deserialize)]
struct AddCompetitorBody {
    name: String,
    #[serde(default)]
    team: String,
}

#[derive(Deserialize)]
struct SetWinnerBody {
    index: usize,
    side: Side,
}

#[derive(Deserialize)]
struct ClearWinnerBody {
    index: usize,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and competitor name.
#[derive(Deserialize)]
struct TournamentCompetitorPath {
    id: TournamentId,
    name: String,
}

fn bad_request(e: impl Display) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn ok_view(t: &Tournament) -> HttpResponse {
    HttpResponse::Ok().json(TournamentView::new(t))
}

/// Look up a tournament, refresh its activity time, and run `f` on it under the write lock.
fn with_tournament<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.tournament)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "swiss-tournament-web",
    })
}

/// Create a new tournament (returns it with id). Every option field is optional.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Option<Json<TournamentOptions>>) -> HttpResponse {
    let options = body.map(Json::into_inner).unwrap_or_default();
    if options.pairing.exhaustive_limit > options.pairing.effective_limit() {
        log::warn!(
            "exhaustive_limit {} capped at {}",
            options.pairing.exhaustive_limit,
            options.pairing.effective_limit()
        );
    }
    let tournament = Tournament::new(options);
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("Created tournament {}", id);
    let entry = g.entry(id).or_insert(TournamentEntry {
        tournament,
        last_activity: Instant::now(),
    });
    ok_view(&entry.tournament)
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| ok_view(t))
}

#[post("/api/tournaments/{id}/competitors")]
async fn api_add_competitor(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddCompetitorBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| match t.add_competitor(&body.name, &body.team) {
        Ok(()) => ok_view(t),
        Err(e) => bad_request(e),
    })
}

#[delete("/api/tournaments/{id}/competitors/{name}")]
async fn api_remove_competitor(state: AppState, path: Path<TournamentCompetitorPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match t.remove_competitor(&path.name) {
        Ok(()) => ok_view(t),
        Err(e) => bad_request(e),
    })
}

/// Erase the whole roster (also closes any open round).
#[delete("/api/tournaments/{id}/competitors")]
async fn api_erase_competitors(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        t.erase_roster();
        ok_view(t)
    })
}

/// Fill an empty roster with sample teams.
#[post("/api/tournaments/{id}/competitors/sample")]
async fn api_sample_teams(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match t.add_sample_teams() {
        Ok(()) => ok_view(t),
        Err(e) => bad_request(e),
    })
}

/// Reset every competitor to 0-0 (also closes any open round).
#[post("/api/tournaments/{id}/reset")]
async fn api_reset_scores(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        t.reset_scores();
        ok_view(t)
    })
}

/// Begin the competition / open the next round.
#[post("/api/tournaments/{id}/rounds")]
async fn api_begin_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        match begin_round(t, &mut rand::thread_rng()).map(|_| ()) {
            Ok(()) => ok_view(t),
            Err(e) => bad_request(e),
        }
    })
}

#[put("/api/tournaments/{id}/rounds/winner")]
async fn api_set_winner(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SetWinnerBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| match set_winner(t, body.index, body.side) {
        Ok(()) => ok_view(t),
        Err(e) => bad_request(e),
    })
}

#[delete("/api/tournaments/{id}/rounds/winner")]
async fn api_clear_winner(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ClearWinnerBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| match clear_winner(t, body.index) {
        Ok(()) => ok_view(t),
        Err(e) => bad_request(e),
    })
}

/// Finalize the open round; if the competition continues, open the next one.
#[post("/api/tournaments/{id}/rounds/finalize")]
async fn api_finalize_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let outcome = match finalize_round(t) {
            Ok(outcome) => outcome,
            Err(e) => return bad_request(e),
        };
        if !outcome.complete {
            if let Err(e) = begin_round(t, &mut rand::thread_rng()).map(|_| ()) {
                log::warn!("Could not open next round for {}: {}", t.id, e);
            }
        }
        HttpResponse::Ok().json(FinalizeResponse {
            outcome,
            tournament: TournamentView::new(t),
        })
    })
}

#[get("/api/tournaments/{id}/team-points")]
async fn api_team_points(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let formula = t.options.team_points;
        HttpResponse::Ok().json(TeamPointsResponse {
            formula,
            teams: team_points(t.roster.competitors(), formula),
        })
    })
}

/// Download the roster as CSV.
#[get("/api/tournaments/{id}/roster.csv")]
async fn api_export_roster(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match roster_to_csv(&t.roster) {
        Ok(csv) => {
            let file_name = roster_file_name(chrono::Local::now().date_naive());
            HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{}\"", file_name),
                ))
                .body(csv)
        }
        Err(e) => bad_request(e),
    })
}

/// Replace the roster from an uploaded CSV body.
#[put("/api/tournaments/{id}/roster.csv")]
async fn api_import_roster(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    with_tournament(&state, path.id, |t| match roster_from_csv(&body) {
        Ok(roster) => {
            log::info!("Imported {} competitor(s) into {}", roster.len(), t.id);
            t.replace_roster(roster);
            ok_view(t)
        }
        Err(e) => bad_request(e),
    })
}

/// Listen address, from HOST / PORT.
struct ServerConfig {
    host: String,
    port: u16,
}

impl ServerConfig {
    const DEFAULT_HOST: &'static str = "0.0.0.0";
    const DEFAULT_PORT: u16 = 8080;

    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| Self::DEFAULT_HOST.to_string());
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid PORT {:?}, using {}", raw, Self::DEFAULT_PORT);
                Self::DEFAULT_PORT
            }),
            Err(_) => Self::DEFAULT_PORT,
        };
        Self { host, port }
    }
}

/// Drop tournaments nobody has touched within `INACTIVITY_TIMEOUT`. Returns how many went.
fn evict_idle(state: &AppState) -> usize {
    let Ok(mut tournaments) = state.write() else {
        return 0;
    };
    let before = tournaments.len();
    tournaments.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
    before - tournaments.len()
}

fn spawn_idle_sweeper(state: AppState) {
    actix_web::rt::spawn(async move {
        let mut ticks = actix_web::rt::time::interval(SWEEP_INTERVAL);
        loop {
            ticks.tick().await;
            let evicted = evict_idle(&state);
            if evicted > 0 {
                log::info!("Evicted {} idle tournament(s)", evicted);
            }
        }
    });
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("Swiss pairing server listening on {}:{}", config.host, config.port);

    let state: AppState = Data::new(RwLock::new(HashMap::new()));
    spawn_idle_sweeper(state.clone());

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_competitor)
            .service(api_erase_competitors)
            .service(api_sample_teams)
            .service(api_remove_competitor)
            .service(api_reset_scores)
            .service(api_begin_round)
            .service(api_set_winner)
            .service(api_clear_winner)
            .service(api_finalize_round)
            .service(api_team_points)
            .service(api_export_roster)
            .service(api_import_roster)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(idle: Duration) -> TournamentEntry {
        TournamentEntry {
            tournament: Tournament::new(TournamentOptions::default()),
            last_activity: Instant::now()
                .checked_sub(idle)
                .unwrap_or_else(Instant::now),
        }
    }

    #[test]
    fn evict_idle_keeps_recent_tournaments() {
        let state: AppState = Data::new(RwLock::new(HashMap::new()));
        let fresh = entry(Duration::from_secs(60));
        let stale = entry(INACTIVITY_TIMEOUT + Duration::from_secs(60));
        let fresh_id = fresh.tournament.id;
        {
            let mut g = state.write().unwrap();
            g.insert(fresh_id, fresh);
            g.insert(stale.tournament.id, stale);
        }
        assert_eq!(evict_idle(&state), 1);
        let g = state.read().unwrap();
        assert_eq!(g.len(), 1);
        assert!(g.contains_key(&fresh_id));
    }
}
