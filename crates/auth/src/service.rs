//! Auth-Dienst fuer Pfoertner
//!
//! Zentraler Dienst fuer Registrierung, Anmeldepruefung, Session-Lebenszyklus
//! (Ein-Token-Modell auf dem Benutzerdatensatz) und Passwort-Reset.
//!
//! Jede zustandsaendernde Operation ist ein Lesen-Pruefen-Schreiben gegen
//! den Credential Store ohne Transaktion; bei konkurrierenden Zugriffen auf
//! denselben Datensatz gewinnt der letzte Schreiber.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use pfoertner_db::{
    models::{BenutzerRecord, BenutzerUpdate, NeuerBenutzer},
    repository::UserRepository,
};

use crate::{
    error::{AuthError, AuthResult},
    password::{passwort_hashen, passwort_verifizieren},
    token::token_generieren,
};

/// Auth-Dienst – Einstiegspunkt fuer alle Anmeldevorgaenge
///
/// Wird als explizite Abhaengigkeit in die HTTP-Schicht injiziert,
/// nicht als globaler Singleton gehalten.
pub struct AuthDienst<U: UserRepository> {
    repo: Arc<U>,
}

impl<U: UserRepository> AuthDienst<U> {
    /// Erstellt einen neuen AuthDienst
    pub fn neu(repo: Arc<U>) -> Self {
        Self { repo }
    }

    /// Gibt das zugrundeliegende Repository zurueck
    pub fn repo(&self) -> &Arc<U> {
        &self.repo
    }

    /// Registriert einen neuen Benutzer
    ///
    /// Prueft per Lookup ob die E-Mail bereits registriert ist und legt
    /// dann den Datensatz mit gehashtem Passwort an. Session- und
    /// Reset-Token sind initial nicht gesetzt.
    pub async fn registrieren(&self, email: &str, passwort: &str) -> AuthResult<Uuid> {
        if self.repo.get_by_email(email).await?.is_some() {
            return Err(AuthError::BereitsRegistriert(email.to_string()));
        }

        let passwort_hash = passwort_hashen(passwort)?;
        let benutzer = self
            .repo
            .create(NeuerBenutzer {
                email,
                password_hash: &passwort_hash,
            })
            .await?;

        tracing::info!(user_id = %benutzer.id, "Neuer Benutzer registriert");
        Ok(benutzer.id)
    }

    /// Prueft Anmeldedaten
    ///
    /// Unbekannte E-Mail und falsches Passwort werden einheitlich als
    /// `false` gemeldet; auch ein unlesbarer gespeicherter Hash fuehrt
    /// nicht zu einem Fehler nach aussen.
    pub async fn anmeldung_pruefen(&self, email: &str, passwort: &str) -> AuthResult<bool> {
        let benutzer = match self.repo.get_by_email(email).await? {
            Some(b) => b,
            None => return Ok(false),
        };

        let korrekt = matches!(
            passwort_verifizieren(passwort, &benutzer.password_hash),
            Ok(true)
        );
        if !korrekt {
            tracing::warn!("Fehlgeschlagener Anmeldeversuch");
        }
        Ok(korrekt)
    }

    /// Erstellt eine Session fuer den Benutzer mit dieser E-Mail
    ///
    /// Gibt `Ok(None)` zurueck wenn kein Benutzer existiert. Ein bereits
    /// gespeicherter Session-Token wird ueberschrieben: eine neue Anmeldung
    /// invalidiert die vorige Session (Ein-Token-Modell).
    pub async fn session_erstellen(&self, email: &str) -> AuthResult<Option<String>> {
        let benutzer = match self.repo.get_by_email(email).await? {
            Some(b) => b,
            None => return Ok(None),
        };

        let token = token_generieren();
        self.repo
            .update(
                benutzer.id,
                BenutzerUpdate {
                    session_token: Some(Some(token.clone())),
                    session_created_at: Some(Some(Utc::now())),
                    ..Default::default()
                },
            )
            .await?;

        tracing::debug!(user_id = %benutzer.id, "Session erstellt");
        Ok(Some(token))
    }

    /// Loest einen Session-Token zum Benutzerdatensatz auf
    ///
    /// `Ok(None)` bei leerem Token oder fehlendem Treffer.
    pub async fn benutzer_fuer_session(&self, token: &str) -> AuthResult<Option<BenutzerRecord>> {
        if token.is_empty() {
            return Ok(None);
        }
        Ok(self.repo.get_by_session_token(token).await?)
    }

    /// Beendet die Session eines Benutzers
    ///
    /// Idempotent: unbekannte Benutzer-ID oder fehlende Session sind
    /// kein Fehler.
    pub async fn session_beenden(&self, user_id: Uuid) -> AuthResult<()> {
        if self.repo.get_by_id(user_id).await?.is_none() {
            return Ok(());
        }

        self.repo
            .update(
                user_id,
                BenutzerUpdate {
                    session_token: Some(None),
                    session_created_at: Some(None),
                    ..Default::default()
                },
            )
            .await?;

        tracing::debug!(user_id = %user_id, "Session beendet");
        Ok(())
    }

    /// Stellt einen Passwort-Reset-Token aus
    ///
    /// Gibt `UnbekannterBenutzer` zurueck wenn die E-Mail nicht existiert.
    /// Ein vorhandener Reset-Token wird ueberschrieben.
    pub async fn reset_token_ausstellen(&self, email: &str) -> AuthResult<String> {
        let benutzer = self
            .repo
            .get_by_email(email)
            .await?
            .ok_or_else(|| AuthError::UnbekannterBenutzer(email.to_string()))?;

        let token = token_generieren();
        self.repo
            .update(
                benutzer.id,
                BenutzerUpdate {
                    reset_token: Some(Some(token.clone())),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!(user_id = %benutzer.id, "Reset-Token ausgestellt");
        Ok(token)
    }

    /// Setzt das Passwort per Reset-Token neu
    ///
    /// Schlaegt mit `ResetUngueltig` fehl wenn kein Datensatz existiert,
    /// bei dem E-Mail UND Token exakt passen. Bei Erfolg wird der Token
    /// geloescht: jeder Token autorisiert genau eine Passwortaenderung.
    pub async fn passwort_aktualisieren(
        &self,
        email: &str,
        reset_token: &str,
        neues_passwort: &str,
    ) -> AuthResult<()> {
        let benutzer = self
            .repo
            .get_by_email_und_reset_token(email, reset_token)
            .await?
            .ok_or(AuthError::ResetUngueltig)?;

        let neuer_hash = passwort_hashen(neues_passwort)?;
        self.repo
            .update(
                benutzer.id,
                BenutzerUpdate {
                    password_hash: Some(neuer_hash),
                    reset_token: Some(None),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!(user_id = %benutzer.id, "Passwort per Reset-Token aktualisiert");
        Ok(())
    }
}
