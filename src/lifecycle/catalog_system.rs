use crate::actors::ActorError;
use crate::clients::{ActorsClient, MoviesClient, RecordClient};
use crate::framework::{
    CatalogClient, GatewayError, HttpBackend, HttpCatalogService, MemoryCatalogService,
};
use crate::lifecycle::{Config, ConfigError};
use crate::model::{Actor, ActorDraft, Movie, MovieDraft};
use crate::movies::MovieError;
use crate::views::{AdminToggle, CatalogView, HomeView};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};
use url::Url;

/// Errors raised while starting or stopping the system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Actors(#[from] ActorError),

    #[error(transparent)]
    Movies(#[from] MovieError),

    #[error("invalid asset base: {0}")]
    AssetBase(#[from] url::ParseError),

    #[error("service task failed: {0}")]
    TaskFailed(String),
}

/// The running catalog: gateway services plus the clients and admin toggle views are built
/// from.
///
/// # Shutdown
///
/// Views hold clients. Drop them before calling [`shutdown`](Self::shutdown), which waits for
/// every service to see its channel close.
pub struct CatalogSystem {
    pub actors: ActorsClient,
    pub movies: MoviesClient,
    pub catalog: CatalogClient,
    admin: AdminToggle,
    debounce: Duration,
    suggestion_fallback: usize,
    asset_base: Url,
    handles: Vec<JoinHandle<()>>,
}

impl CatalogSystem {
    /// Starts against the REST collaborator, or in memory when `config.offline` is set.
    pub fn start(config: &Config) -> Result<Self, SystemError> {
        if config.offline {
            Self::in_memory(config)
        } else {
            Self::connect(config)
        }
    }

    /// Starts HTTP-backed services for the configured collaborator.
    pub fn connect(config: &Config) -> Result<Self, SystemError> {
        let base = config
            .backend_url
            .as_ref()
            .ok_or(ConfigError::Missing("CINEBASE_BACKEND_URL"))?;
        let backend = Arc::new(HttpBackend::new(base, config.request_timeout)?);

        let (actor_service, actors) = crate::actors::new_http(Arc::clone(&backend));
        let (movie_service, movies) = crate::movies::new_http(Arc::clone(&backend));
        let (catalog_service, catalog) = HttpCatalogService::new(32, backend);

        let handles = vec![
            tokio::spawn(actor_service.run()),
            tokio::spawn(movie_service.run()),
            tokio::spawn(catalog_service.run()),
        ];
        info!(backend = %base, "Catalog system connected");

        Self::assemble(config, actors, movies, catalog, handles)
    }

    /// Starts the in-memory collaborator with empty stores.
    pub fn in_memory(config: &Config) -> Result<Self, SystemError> {
        let (actor_service, actors) = crate::actors::new_memory();
        let (movie_service, movies) = crate::movies::new_memory();
        let (catalog_service, catalog) = MemoryCatalogService::new(32);

        // The catalog service answers from the two stores.
        let handles = vec![
            tokio::spawn(actor_service.run()),
            tokio::spawn(movie_service.run()),
            tokio::spawn(
                catalog_service.run((actors.inner().clone(), movies.inner().clone())),
            ),
        ];
        info!("Catalog system started in memory");

        Self::assemble(config, actors, movies, catalog, handles)
    }

    fn assemble(
        config: &Config,
        actors: ActorsClient,
        movies: MoviesClient,
        catalog: CatalogClient,
        handles: Vec<JoinHandle<()>>,
    ) -> Result<Self, SystemError> {
        Ok(Self {
            actors,
            movies,
            catalog,
            admin: AdminToggle::new(),
            debounce: config.debounce,
            suggestion_fallback: config.suggestion_fallback,
            asset_base: config.asset_base()?,
            handles,
        })
    }

    /// The admin flag's single writer.
    pub fn admin(&self) -> &AdminToggle {
        &self.admin
    }

    pub fn actor_view(&self) -> CatalogView<Actor> {
        CatalogView::new(
            self.actors.inner().clone(),
            self.admin.mode(),
            self.asset_base.clone(),
            self.debounce,
        )
    }

    pub fn movie_view(&self) -> CatalogView<Movie> {
        CatalogView::new(
            self.movies.inner().clone(),
            self.admin.mode(),
            self.asset_base.clone(),
            self.debounce,
        )
    }

    pub fn home_view(&self) -> HomeView {
        HomeView::new(
            self.catalog.clone(),
            self.actors.inner().clone(),
            self.movies.inner().clone(),
            self.suggestion_fallback,
            self.asset_base.clone(),
        )
    }

    /// Fills the stores with a small demo catalog.
    pub async fn seed_demo(&self) -> Result<(), SystemError> {
        let actors = [
            ("Marion Cotillard", 49, "Française", "Oscar de la meilleure actrice pour La Môme."),
            (
                "Jean Dujardin",
                53,
                "Française",
                "Révélé par Brice de Nice, oscarisé pour The Artist.",
            ),
            ("Omar Sy", 47, "Française", "César du meilleur acteur pour Intouchables."),
            ("Mads Mikkelsen", 60, "Danoise", "Acteur danois, ancien danseur."),
        ];
        for (name, age, nationality, biography) in actors {
            self.actors
                .create_actor(ActorDraft {
                    name: name.to_string(),
                    age: Some(age),
                    nationality: Some(nationality.to_string()),
                    biography: Some(biography.to_string()),
                })
                .await?;
        }

        let movies = [
            ("La Môme", 2007, "Biographie", "La vie d'Édith Piaf."),
            ("The Artist", 2011, "Drame", "Un acteur du muet face à l'arrivée du parlant."),
            ("Intouchables", 2011, "Comédie", "Une amitié improbable entre deux hommes."),
            ("Drunk", 2020, "Drame", "Quatre professeurs testent une théorie."),
        ];
        for (name, year, genre, description) in movies {
            self.movies
                .create_movie(MovieDraft {
                    name: name.to_string(),
                    year: Some(year),
                    genre: Some(genre.to_string()),
                    description: Some(description.to_string()),
                    external_link: None,
                })
                .await?;
        }

        info!(actors = actors.len(), movies = movies.len(), "Demo catalog seeded");
        Ok(())
    }

    /// Drops every client, which closes the service channels, then waits for the service
    /// tasks to finish.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down catalog system...");

        drop(self.actors);
        drop(self.movies);
        drop(self.catalog);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Service task failed: {:?}", e);
                return Err(SystemError::TaskFailed(format!("{e:?}")));
            }
        }

        info!("Catalog system shutdown complete.");
        Ok(())
    }
}
