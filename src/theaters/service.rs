use crate::theaters::error::TheaterError;
use crate::theaters::geo;
use crate::theaters::models::{
    CreateTheaterRequest, Theater, TheaterDetail, TheaterWithDistance, UpdateTheaterRequest,
};
use crate::theaters::repository::TheatersRepository;

/// Service for theater business logic
#[derive(Clone)]
pub struct TheaterService {
    repo: TheatersRepository,
}

impl TheaterService {
    /// Create a new TheaterService
    pub fn new(repo: TheatersRepository) -> Self {
        Self { repo }
    }

    /// Create a theater with its screens
    ///
    /// The location must be one of the known named locations; screens are
    /// created in the same transaction as the theater.
    pub async fn create_theater(
        &self,
        request: CreateTheaterRequest,
    ) -> Result<TheaterDetail, TheaterError> {
        let location = geo::find(&request.location)
            .ok_or_else(|| TheaterError::UnknownLocation(request.location.clone()))?;

        let theater = self
            .repo
            .create(&request.theater_name, location.name, &request.screens)
            .await?;

        let screens = self.repo.screens_for(theater.theater_id).await?;

        tracing::info!(
            "Created theater {} ({}) with {} screens",
            theater.theater_id,
            theater.theater_name,
            screens.len()
        );

        Ok(TheaterDetail {
            theater_id: theater.theater_id,
            theater_name: theater.theater_name,
            location: theater.location,
            screens,
        })
    }

    /// List all theaters, unsorted
    pub async fn list_theaters(&self) -> Result<Vec<Theater>, TheaterError> {
        self.repo.find_all().await
    }

    /// List all theaters sorted by distance from a named location
    ///
    /// Distances are whole kilometers; theaters whose stored location is no
    /// longer in the location table are skipped rather than guessed at.
    pub async fn list_theaters_by_distance(
        &self,
        from: &str,
    ) -> Result<Vec<TheaterWithDistance>, TheaterError> {
        let origin =
            geo::find(from).ok_or_else(|| TheaterError::UnknownLocation(from.to_string()))?;

        let theaters = self.repo.find_all().await?;

        let mut with_distances: Vec<TheaterWithDistance> = theaters
            .into_iter()
            .filter_map(|theater| {
                geo::find(&theater.location).map(|loc| TheaterWithDistance {
                    theater_id: theater.theater_id,
                    theater_name: theater.theater_name,
                    location: theater.location,
                    distance_km: geo::distance_km(origin, loc) as u32,
                })
            })
            .collect();

        with_distances.sort_by_key(|t| t.distance_km);

        Ok(with_distances)
    }

    /// Get a theater with its screens
    pub async fn get_theater(&self, theater_id: i32) -> Result<TheaterDetail, TheaterError> {
        let theater = self
            .repo
            .find_by_id(theater_id)
            .await?
            .ok_or(TheaterError::NotFound)?;

        let screens = self.repo.screens_for(theater_id).await?;

        Ok(TheaterDetail {
            theater_id: theater.theater_id,
            theater_name: theater.theater_name,
            location: theater.location,
            screens,
        })
    }

    /// Update a theater, keeping existing values for omitted fields
    pub async fn update_theater(
        &self,
        theater_id: i32,
        request: UpdateTheaterRequest,
    ) -> Result<Theater, TheaterError> {
        let existing = self
            .repo
            .find_by_id(theater_id)
            .await?
            .ok_or(TheaterError::NotFound)?;

        let location = match request.location {
            Some(loc) => geo::find(&loc)
                .ok_or_else(|| TheaterError::UnknownLocation(loc.clone()))?
                .name
                .to_string(),
            None => existing.location,
        };

        let name = request.theater_name.unwrap_or(existing.theater_name);

        self.repo.update(theater_id, &name, &location).await
    }

    /// Delete a theater; rejected while showtimes reference it
    pub async fn delete_theater(&self, theater_id: i32) -> Result<(), TheaterError> {
        if self
            .repo
            .find_by_id(theater_id)
            .await?
            .is_none()
        {
            return Err(TheaterError::NotFound);
        }

        if self.repo.has_showtimes(theater_id).await? {
            return Err(TheaterError::ReferencedByShowtime);
        }

        self.repo.delete(theater_id).await
    }

    /// Explicit admin cascade: removes the theater's showtimes and screens
    /// along with the theater
    pub async fn delete_theater_cascade(&self, theater_id: i32) -> Result<(), TheaterError> {
        if self
            .repo
            .find_by_id(theater_id)
            .await?
            .is_none()
        {
            return Err(TheaterError::NotFound);
        }

        self.repo.delete_cascade(theater_id).await
    }
}
