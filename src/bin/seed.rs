//! Loads a small set of sample venues, artists and shows into an empty directory.

use anyhow::{bail, Context, Result};
use sqlx::PgConnection;
use time::macros::datetime;
use time::OffsetDateTime;

use fyyur::config::Config;
use fyyur::models::artist::{Artist, NewArtist};
use fyyur::models::show::{NewShow, Show};
use fyyur::models::venue::{NewVenue, Venue};
use fyyur::models::DateTimeScalar;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    fyyur::init_tracing();

    let config = Config::from_env()?;
    let pool = fyyur::db::connect(&config).await?;
    fyyur::db::migrate(&pool).await?;

    let mut tx = pool.begin().await?;
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM venues")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        bail!("The directory already has {} venue(s); refusing to seed", existing);
    }

    seed(&mut tx).await?;
    tx.commit().await.context("Failed to commit sample data")?;

    tracing::info!("sample data loaded");
    Ok(())
}

async fn seed(conn: &mut PgConnection) -> Result<()> {
    let musical_hop = Venue::create(
        NewVenue {
            name: "The Musical Hop".to_owned(),
            genres: strings(&["Jazz", "Reggae", "Classical", "Folk"]),
            address: "1015 Folsom Street".to_owned(),
            city: "San Francisco".to_owned(),
            state: "CA".to_owned(),
            phone: "123-123-1234".to_owned(),
            website: "https://www.themusicalhop.com".to_owned(),
            facebook_link: "https://www.facebook.com/TheMusicalHop".to_owned(),
            seeking_talent: true,
            seeking_description: "We are on the lookout for a local artist to play every \
                                  two weeks. Please call us."
                .to_owned(),
            image_link: "https://images.unsplash.com/photo-1543900694-133f37abaaa5".to_owned(),
        },
        &mut *conn,
    )
    .await?;

    Venue::create(
        NewVenue {
            name: "The Dueling Pianos Bar".to_owned(),
            genres: strings(&["Classical", "R&B", "Hip-Hop"]),
            address: "335 Delancey Street".to_owned(),
            city: "New York".to_owned(),
            state: "NY".to_owned(),
            phone: "914-003-1132".to_owned(),
            website: "https://www.theduelingpianos.com".to_owned(),
            facebook_link: "https://www.facebook.com/theduelingpianos".to_owned(),
            seeking_talent: false,
            seeking_description: String::new(),
            image_link: "https://images.unsplash.com/photo-1497032205916-ac775f0649ae".to_owned(),
        },
        &mut *conn,
    )
    .await?;

    let park_square = Venue::create(
        NewVenue {
            name: "Park Square Live Music & Coffee".to_owned(),
            genres: strings(&["Rock n Roll", "Jazz", "Classical", "Folk"]),
            address: "34 Whiskey Moore Ave".to_owned(),
            city: "San Francisco".to_owned(),
            state: "CA".to_owned(),
            phone: "415-000-1234".to_owned(),
            website: "https://www.parksquarelivemusicandcoffee.com".to_owned(),
            facebook_link: "https://www.facebook.com/ParkSquareLiveMusicAndCoffee".to_owned(),
            seeking_talent: false,
            seeking_description: String::new(),
            image_link: "https://images.unsplash.com/photo-1485686531765-ba63b07845a7".to_owned(),
        },
        &mut *conn,
    )
    .await?;

    let guns_n_petals = Artist::create(
        NewArtist {
            name: "Guns N Petals".to_owned(),
            genres: strings(&["Rock n Roll"]),
            city: "San Francisco".to_owned(),
            state: "CA".to_owned(),
            phone: "326-123-5000".to_owned(),
            website: "https://www.gunsnpetalsband.com".to_owned(),
            facebook_link: "https://www.facebook.com/GunsNPetals".to_owned(),
            seeking_venue: true,
            seeking_description: "Looking for shows to perform at in the San Francisco Bay \
                                  Area!"
                .to_owned(),
            image_link: "https://images.unsplash.com/photo-1549213783-8284d0336c4f".to_owned(),
        },
        &mut *conn,
    )
    .await?;

    let matt_quevedo = Artist::create(
        NewArtist {
            name: "Matt Quevedo".to_owned(),
            genres: strings(&["Jazz"]),
            city: "New York".to_owned(),
            state: "NY".to_owned(),
            phone: "300-400-5000".to_owned(),
            website: String::new(),
            facebook_link: "https://www.facebook.com/mattquevedo923251523".to_owned(),
            seeking_venue: false,
            seeking_description: String::new(),
            image_link: "https://images.unsplash.com/photo-1495223153807-b916f75de8c5".to_owned(),
        },
        &mut *conn,
    )
    .await?;

    let wild_sax_band = Artist::create(
        NewArtist {
            name: "The Wild Sax Band".to_owned(),
            genres: strings(&["Jazz", "Classical"]),
            city: "San Francisco".to_owned(),
            state: "CA".to_owned(),
            phone: "432-325-5432".to_owned(),
            website: String::new(),
            facebook_link: String::new(),
            seeking_venue: false,
            seeking_description: String::new(),
            image_link: "https://images.unsplash.com/photo-1558369981-f9ca78462e61".to_owned(),
        },
        &mut *conn,
    )
    .await?;

    let shows: [(i64, i64, OffsetDateTime); 5] = [
        (musical_hop, guns_n_petals, datetime!(2019-05-21 21:30:00 UTC)),
        (park_square, matt_quevedo, datetime!(2019-06-15 23:00:00 UTC)),
        (park_square, wild_sax_band, datetime!(2035-04-01 20:00:00 UTC)),
        (park_square, wild_sax_band, datetime!(2035-04-08 20:00:00 UTC)),
        (park_square, wild_sax_band, datetime!(2035-04-15 20:00:00 UTC)),
    ];
    for (venue_id, artist_id, start_time) in shows {
        Show::create(
            NewShow {
                venue_id,
                artist_id,
                start_time: DateTimeScalar(start_time),
            },
            &mut *conn,
        )
        .await?;
    }

    Ok(())
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
