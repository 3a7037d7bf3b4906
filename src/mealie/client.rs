// ABOUTME: Authenticated Mealie REST client used by the recipe and meal plan tools
// ABOUTME: Wraps search, fetch, import, note, and meal plan endpoints with bearer auth
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::models::{
    MealplanQuery, NewMealplanEntry, Recipe, RecipeNote, RecipePage, RecipeSearch,
};
use crate::constants::{mealie::SEARCH_PAGE_SIZE, service_names};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::utils::http_client::{body_snippet, join_url, shared_client};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

#[derive(Serialize)]
struct ImportFromUrl<'a> {
    include_tags: bool,
    url: &'a str,
}

#[derive(Serialize)]
struct NotesUpdate<'a> {
    notes: &'a [RecipeNote],
}

/// Mealie client bound to one credential for the lifetime of the process
#[derive(Clone)]
pub struct MealieClient {
    base_url: String,
    token: String,
    client: Client,
}

impl std::fmt::Debug for MealieClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MealieClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl MealieClient {
    /// Create a client for `base_url` authenticating with `token`
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            client: shared_client(),
        }
    }

    /// Base URL of the Mealie instance
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, join_url(&self.base_url, path))
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn send(request: RequestBuilder, operation: &str) -> AppResult<Response> {
        let response = request.send().await.map_err(|e| {
            AppError::external_unavailable(service_names::MEALIE, format!("{operation}: {e}"))
                .with_source(e)
        })?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = body_snippet(response).await;
        Err(AppError::external_service(
            service_names::MEALIE,
            format!("{operation} returned HTTP {status}: {body}"),
        ))
    }

    async fn json<T: DeserializeOwned>(request: RequestBuilder, operation: &str) -> AppResult<T> {
        Self::send(request, operation)
            .await?
            .json()
            .await
            .map_err(|e| {
                AppError::external_service(
                    service_names::MEALIE,
                    format!("{operation} returned an unexpected body: {e}"),
                )
            })
    }

    /// First page of recipes matching the search
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a recipe page
    pub async fn search_recipes(&self, search: &RecipeSearch) -> AppResult<RecipePage> {
        let mut query: Vec<(&str, String)> = vec![
            ("page", "1".to_owned()),
            ("perPage", SEARCH_PAGE_SIZE.to_string()),
        ];
        if !search.search_term.is_empty() {
            query.push(("search", search.search_term.clone()));
        }
        query.extend(search.categories.iter().map(|c| ("categories", c.clone())));
        query.extend(search.tags.iter().map(|t| ("tags", t.clone())));

        debug!(search = %search.search_term, "Searching recipes");
        let request = self.request(Method::GET, "/api/recipes").query(&query);
        Self::json(request, "search recipes").await
    }

    /// Full recipe by slug
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the recipe does not exist
    pub async fn get_recipe(&self, slug: &str) -> AppResult<Recipe> {
        let request = self.request(Method::GET, &recipe_path(slug)?);
        Self::json(request, "get recipe").await
    }

    /// Scrape a recipe from a web page into Mealie, returning the new slug
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Mealie rejects the URL
    pub async fn import_recipe_from_url(&self, url: &str, include_tags: bool) -> AppResult<String> {
        let request = self
            .request(Method::POST, "/api/recipes/create/url")
            .json(&ImportFromUrl { include_tags, url });
        let body = Self::send(request, "import recipe")
            .await?
            .text()
            .await
            .map_err(|e| AppError::external_service(service_names::MEALIE, e.to_string()))?;
        let slug = body.trim().trim_matches('"').to_owned();
        info!(url = %url, slug = %slug, "Imported recipe");
        Ok(slug)
    }

    /// Append a note to a recipe, returning all notes after the update
    ///
    /// # Errors
    ///
    /// Returns an error if fetching or patching the recipe fails
    pub async fn add_recipe_note(&self, slug: &str, note: RecipeNote) -> AppResult<Vec<RecipeNote>> {
        let mut notes = self.get_recipe(slug).await?.notes;
        notes.push(note);

        let request = self
            .request(Method::PATCH, &recipe_path(slug)?)
            .json(&NotesUpdate { notes: &notes });
        let updated: Recipe = Self::json(request, "update recipe notes").await?;
        info!(slug = %slug, note_count = updated.notes.len(), "Added recipe note");
        Ok(updated.notes)
    }

    /// Meal plans for the current household
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails
    pub async fn get_mealplans(&self, query: &MealplanQuery) -> AppResult<Value> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(start) = &query.start_date {
            params.push(("startDate", start.clone()));
        }
        if let Some(end) = &query.end_date {
            params.push(("endDate", end.clone()));
        }
        if let Some(page) = query.page {
            params.push(("page", page.to_string()));
        }
        if let Some(per_page) = query.per_page {
            params.push(("perPage", per_page.to_string()));
        }
        let request = self
            .request(Method::GET, "/api/households/mealplans")
            .query(&params);
        Self::json(request, "list meal plans").await
    }

    /// Today's meal plan entries
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails
    pub async fn get_todays_mealplan(&self) -> AppResult<Value> {
        let request = self.request(Method::GET, "/api/households/mealplans/today");
        Self::json(request, "get today's meal plan").await
    }

    /// Create a meal plan entry
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Mealie rejects the entry
    pub async fn create_mealplan(&self, entry: &NewMealplanEntry) -> AppResult<Value> {
        let request = self
            .request(Method::POST, "/api/households/mealplans")
            .json(entry);
        let created = Self::json(request, "create meal plan").await?;
        info!(date = %entry.date, entry_type = %entry.entry_type, "Created meal plan entry");
        Ok(created)
    }
}

/// Path of a single recipe. The slug must be one plain path segment.
fn recipe_path(slug: &str) -> AppResult<String> {
    let plain = !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\', '?', '#', '%']);
    if plain {
        Ok(format!("/api/recipes/{slug}"))
    } else {
        Err(AppError::new(
            ErrorCode::InvalidInput,
            format!("Invalid recipe slug '{slug}'"),
        ))
    }
}
