//! Transformation: aggregation records to search documents.
//!
//! The repository returns raw records with `Option`-typed aggregates (SQL
//! yields NULL for a root with no matching join rows). This module owns the
//! strict normalization contract: every array-typed field of an outgoing
//! document is an empty collection, never null.

use std::sync::Arc;

use catalog_indexer_repository::{
    CatalogRepository, GenreRecord, Json, MovieRecord, PersonRoleRow,
};
use catalog_indexer_shared::{
    CatalogDocument, DocumentKind, GenreDocument, MovieDocument, PersonDocument, PersonFilm,
};
use uuid::Uuid;

use crate::errors::SyncError;

/// Builds denormalized documents for a batch of root ids.
#[derive(Clone)]
pub struct Transformer {
    repository: Arc<dyn CatalogRepository>,
}

impl Transformer {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    /// Run the aggregation for `kind` over a batch of root ids and return
    /// one normalized document per root.
    pub async fn build_documents(
        &self,
        kind: DocumentKind,
        ids: &[Uuid],
    ) -> Result<Vec<CatalogDocument>, SyncError> {
        let documents = match kind {
            DocumentKind::Movie => self
                .repository
                .movie_records(ids)
                .await?
                .into_iter()
                .map(movie_document)
                .map(CatalogDocument::Movie)
                .collect(),
            DocumentKind::Genre => self
                .repository
                .genre_records(ids)
                .await?
                .into_iter()
                .map(genre_document)
                .map(CatalogDocument::Genre)
                .collect(),
            DocumentKind::Person => fold_person_rows(self.repository.person_role_rows(ids).await?)
                .into_iter()
                .map(CatalogDocument::Person)
                .collect(),
        };

        Ok(documents)
    }
}

fn unwrap_json<T>(aggregate: Option<Json<Vec<T>>>) -> Vec<T> {
    aggregate.map(|json| json.0).unwrap_or_default()
}

/// Normalize one movie record into a document. The six role-partitioned
/// aggregates and the genre aggregate all default to empty.
fn movie_document(record: MovieRecord) -> MovieDocument {
    MovieDocument {
        id: record.id,
        title: record.title,
        description: record.description,
        imdb_rating: record.imdb_rating,
        genres: unwrap_json(record.genres),
        directors_names: record.directors_names.unwrap_or_default(),
        actors_names: record.actors_names.unwrap_or_default(),
        writers_names: record.writers_names.unwrap_or_default(),
        directors: unwrap_json(record.directors),
        actors: unwrap_json(record.actors),
        writers: unwrap_json(record.writers),
    }
}

/// Normalize one genre record into a document.
fn genre_document(record: GenreRecord) -> GenreDocument {
    GenreDocument {
        id: record.id,
        name: record.name,
        description: record.description,
        films: unwrap_json(record.films),
    }
}

/// Fold (person, filmwork) rows, ordered by person id, into one document
/// per person. A person with no filmworks arrives as a single row with null
/// film columns and folds to an empty `films` array.
fn fold_person_rows(rows: Vec<PersonRoleRow>) -> Vec<PersonDocument> {
    let mut documents: Vec<PersonDocument> = Vec::new();

    for row in rows {
        let film = row.film_id.map(|film_id| PersonFilm {
            id: film_id,
            roles: row.roles.unwrap_or_default(),
            imdb_rating: row.film_rating,
        });

        match documents.last_mut() {
            Some(current) if current.id == row.id => {
                current.films.extend(film);
            }
            _ => {
                documents.push(PersonDocument {
                    id: row.id,
                    name: row.name,
                    films: film.into_iter().collect(),
                });
            }
        }
    }

    documents
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_indexer_shared::{GenreRef, PersonRef};

    fn bare_movie_record(id: Uuid) -> MovieRecord {
        MovieRecord {
            id,
            title: "Mirror".to_string(),
            description: None,
            imdb_rating: None,
            genres: None,
            directors: None,
            actors: None,
            writers: None,
            directors_names: None,
            actors_names: None,
            writers_names: None,
        }
    }

    #[test]
    fn test_movie_null_aggregates_normalize_to_empty_arrays() {
        let document = movie_document(bare_movie_record(Uuid::new_v4()));

        assert!(document.genres.is_empty());
        assert!(document.directors.is_empty());
        assert!(document.actors.is_empty());
        assert!(document.writers.is_empty());
        assert!(document.directors_names.is_empty());
        assert!(document.actors_names.is_empty());
        assert!(document.writers_names.is_empty());
    }

    #[test]
    fn test_movie_role_partitions_pass_through() {
        let director = PersonRef {
            id: Uuid::new_v4(),
            name: "Andrei Tarkovsky".to_string(),
        };
        let mut record = bare_movie_record(Uuid::new_v4());
        record.genres = Some(Json(vec![GenreRef {
            id: Uuid::new_v4(),
            name: "Drama".to_string(),
        }]));
        record.directors = Some(Json(vec![director.clone()]));
        record.directors_names = Some(vec![director.name.clone()]);

        let document = movie_document(record);

        assert_eq!(document.directors, vec![director]);
        assert_eq!(document.directors_names, vec!["Andrei Tarkovsky"]);
        assert!(document.actors.is_empty());
        assert_eq!(document.genres.len(), 1);
    }

    #[test]
    fn test_genre_without_films_normalizes_to_empty() {
        let record = GenreRecord {
            id: Uuid::new_v4(),
            name: "Documentary".to_string(),
            description: None,
            films: None,
        };

        assert!(genre_document(record).films.is_empty());
    }

    #[test]
    fn test_person_rows_fold_by_person() {
        let person_a = Uuid::new_v4();
        let person_b = Uuid::new_v4();
        let film = Uuid::new_v4();

        let rows = vec![
            PersonRoleRow {
                id: person_a,
                name: "A".to_string(),
                film_id: Some(film),
                film_rating: Some(7.9),
                roles: Some(vec!["actor".to_string(), "director".to_string()]),
            },
            PersonRoleRow {
                id: person_a,
                name: "A".to_string(),
                film_id: Some(Uuid::new_v4()),
                film_rating: None,
                roles: Some(vec!["writer".to_string()]),
            },
            // Person with no filmworks: single row, null film columns.
            PersonRoleRow {
                id: person_b,
                name: "B".to_string(),
                film_id: None,
                film_rating: None,
                roles: None,
            },
        ];

        let documents = fold_person_rows(rows);

        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].id, person_a);
        assert_eq!(documents[0].films.len(), 2);
        assert_eq!(documents[0].films[0].roles, vec!["actor", "director"]);
        assert_eq!(documents[0].films[0].imdb_rating, Some(7.9));
        assert_eq!(documents[1].id, person_b);
        assert!(documents[1].films.is_empty());
    }
}
